use std::env::var_os;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

const DEFAULT_CONFIG_FILE: &str = "lcdpcf.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The N in `/dev/i2c-N`.
    pub bus: u8,
    /// 7-bit address of the expander. Usually 0x27 or 0x3F.
    pub address: u8,
    pub backlight: bool,
    pub cursor: bool,
    pub blink: bool,
    /// Printed one per display line at startup.
    pub greeting: Vec<String>,
}

impl Config {
    fn path() -> PathBuf {
        let config_str = var_os("LCDPCF_CONFIG");
        let config_str: &OsStr = config_str.as_deref().unwrap_or(OsStr::new(DEFAULT_CONFIG_FILE));
        PathBuf::from(config_str)
    }

    pub fn try_load() -> Option<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(config_path: &Path) -> Option<Self> {
        if config_path.exists() {
            let file = std::fs::File::open(config_path).ok()?;
            let reader = std::io::BufReader::new(file);
            serde_json::from_reader(reader).ok()
        } else {
            None
        }
    }

    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, config_path: &Path) -> std::io::Result<()> {
        let file = std::fs::File::create(config_path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bus: 1,
            address: 0x27,
            backlight: true,
            cursor: false,
            blink: false,
            greeting: vec!["lcdpcf".to_string(), "ready \u{0}".to_string()],
        }
    }
}
