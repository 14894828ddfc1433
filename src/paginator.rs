/// Number of pages needed for `total_items`. An empty collection has no pages.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if total_items == 0 || page_size == 0 {
        return 0;
    }
    (total_items - 1) / page_size + 1
}

pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
    page_count: usize,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: usize) -> Self {
        Paginator {
            items,
            page_size,
            page_count: page_count(items.len(), page_size),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn get_page(&self, page: usize) -> Result<&'a [T], String> {
        match page {
            0 => return Err("Page has to be greater than 0".to_string()),
            x if x > self.page_count => return Err(format!("Page has to be less than page_count ({})", self.page_count)),
            _ => {}
        };

        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        Ok(&self.items[start..end])
    }

    pub fn pages(&self) -> impl Iterator<Item=(usize, &'a [T])> + '_ {
        (1..=self.page_count).filter_map(move |page| self.get_page(page).ok().map(|items| (page, items)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageNaming {
    /// `base.html`, `base_page2.html`, `base_page3.html`
    UnderscorePage,
    /// `base.html`, `base-2.html`, `base-3.html`
    DashAfterFirst,
    /// `base-1.html`, `base-2.html`
    DashAlways,
}

impl PageNaming {
    pub fn file_name(&self, base: &str, page: usize) -> String {
        match self {
            PageNaming::UnderscorePage if page > 1 => format!("{}_page{}.html", base, page),
            PageNaming::DashAfterFirst if page > 1 => format!("{}-{}.html", base, page),
            PageNaming::UnderscorePage | PageNaming::DashAfterFirst => format!("{}.html", base),
            PageNaming::DashAlways => format!("{}-{}.html", base, page),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PageLinker {
    pub folder: Option<String>,
    pub base: String,
    pub naming: PageNaming,
    /// Link the first page as `/` instead of `/{base}.html`.
    pub first_page_is_root: bool,
}

impl PageLinker {
    pub fn root(base: &str, naming: PageNaming) -> Self {
        PageLinker {
            folder: None,
            base: base.to_string(),
            naming,
            first_page_is_root: false,
        }
    }

    pub fn in_folder(folder: &str, base: &str, naming: PageNaming) -> Self {
        PageLinker {
            folder: Some(folder.to_string()),
            base: base.to_string(),
            naming,
            first_page_is_root: false,
        }
    }

    pub fn with_root_first_page(mut self) -> Self {
        self.first_page_is_root = true;
        self
    }

    pub fn file_name(&self, page: usize) -> String {
        self.naming.file_name(&self.base, page)
    }

    pub fn href(&self, page: usize) -> String {
        if page == 1 && self.first_page_is_root && self.folder.is_none() {
            return "/".to_string();
        }
        match self.folder {
            Some(ref folder) => format!("/{}/{}", folder, self.file_name(page)),
            None => format!("/{}", self.file_name(page)),
        }
    }
}
