use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Paths {
    pub root_dir: PathBuf,
    pub stories_dir: String,
    pub category_dir: String,
    pub posts_dir: String,
    pub labels_dir: String,
    pub data_dir: String,
    pub template_dir: PathBuf,
    pub custom_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            root_dir: PathBuf::from("."),
            stories_dir: "cerita".to_string(),
            category_dir: "kategori".to_string(),
            posts_dir: "posts".to_string(),
            labels_dir: "labels".to_string(),
            data_dir: "data".to_string(),
            template_dir: PathBuf::from("template"),
            custom_dir: PathBuf::from("custom"),
        }
    }
}

impl Paths {
    /// Folder holding the category-mode stories. Those files are rewritten in place.
    pub fn stories_path(&self) -> PathBuf {
        self.root_dir.join(&self.stories_dir)
    }

    pub fn category_path(&self) -> PathBuf {
        self.root_dir.join(&self.category_dir)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.root_dir.join(&self.posts_dir)
    }

    pub fn labels_path(&self) -> PathBuf {
        self.root_dir.join(&self.labels_dir)
    }

    pub fn data_path(&self) -> PathBuf {
        self.root_dir.join(&self.data_dir)
    }

    pub fn template_path(&self) -> PathBuf {
        self.root_dir.join(&self.template_dir)
    }

    pub fn custom_path(&self) -> PathBuf {
        self.root_dir.join(&self.custom_dir)
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Site {
    pub title: String,
    pub author: String,
    pub language: String,
    pub fallback_thumbnail: String,
    pub story_page_size: usize,
    pub post_page_size: usize,
    pub story_related_limit: usize,
    pub post_related_limit: usize,
    pub related_seed: Option<u64>,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            title: "Blog Om Sugeng".to_string(),
            author: "Om Sugeng".to_string(),
            language: "id".to_string(),
            fallback_thumbnail: "https://pelukjanda.github.io/tema/no-thumbnail.jpg".to_string(),
            story_page_size: 7,
            post_page_size: 10,
            story_related_limit: 3,
            post_related_limit: 5,
            related_seed: None,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub site: Site,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or_else(|| Path::new("."));
    let rest = path.strip_prefix("${exe_dir}")
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths.root_dir = parse_path(cfg.paths.root_dir)?;
    cfg.paths.template_dir = parse_path(cfg.paths.template_dir)?;
    cfg.paths.custom_dir = parse_path(cfg.paths.custom_dir)?;
    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
    }

    for size in [cfg.site.story_page_size, cfg.site.post_page_size] {
        if size == 0 {
            return Err(io::Error::new(ErrorKind::InvalidData, "Page sizes must be greater than 0"));
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
