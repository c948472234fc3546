use crate::config::LoggingSettings;
use simplelog::*;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

pub fn init(settings: &LoggingSettings) -> anyhow::Result<()> {
    let log_path = Path::new(&settings.file);
    if let Some(log_dir) = log_path.parent() {
        if !log_dir.as_os_str().is_empty() && !log_dir.exists() {
            std::fs::create_dir_all(log_dir)?;
        }
    }

    let log_file = File::create(log_path)?;

    WriteLogger::init(level_filter(&settings.level), Config::default(), log_file)?;

    Ok(())
}

/// Unknown level names fall back to `Info`.
pub fn level_filter(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_parsing() {
        assert_eq!(level_filter("debug"), LevelFilter::Debug);
        assert_eq!(level_filter(" WARN "), LevelFilter::Warn);
        assert_eq!(level_filter("off"), LevelFilter::Off);
        assert_eq!(level_filter("chatty"), LevelFilter::Info);
    }
}
