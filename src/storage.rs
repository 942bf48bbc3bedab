use std::fs;
use std::io;
use std::path::Path;

use crate::models::{SavedState, StateFile};

/// 从TOML文件加载快照
pub fn load_state(path: &Path) -> io::Result<SavedState> {
    if !path.exists() {
        return Ok(SavedState::new());
    }

    let content = fs::read_to_string(path)?;
    let file: StateFile =
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(file.state)
}

/// 保存快照到TOML文件
pub fn save_state(state: &SavedState, path: &Path) -> io::Result<()> {
    let file = StateFile::wrap(state.clone());
    let content =
        toml::to_string_pretty(&file).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TEXT_KEY;

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");

        let mut state = SavedState::new();
        state.put_string(TEXT_KEY, "dolma kalem".to_string());

        save_state(&state, &path).unwrap();
        let loaded = load_state(&path).unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_state(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_empty());
    }
}
