use crate::cli::render::state_label;
use crate::error::Result;
use crate::snapshot::summarize;
use std::path::Path;

/// Describe a save file without opening a model
pub fn show_info(path: &Path) -> Result<String> {
    let summary = summarize(path)?;

    let mut output = String::new();

    output.push_str("dsviz Save File Information\n");
    output.push_str("===========================\n\n");

    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Size: {}\n", format_size(summary.file_size as u64)));
    output.push_str(&format!("Records: {}\n", summary.records.len()));
    output.push('\n');

    for record in &summary.records {
        output.push_str(&format!("{}:\n", record.kind));
        output.push_str(&format!("  Elements: {}\n", record.elements));
        output.push_str(&format!("  Encoded: {}\n", format_size(record.encoded_bytes as u64)));
        if let Some(state) = record.sort_state {
            output.push_str(&format!("  State: {}\n", state_label(state)));
        }
    }
    if !summary.records.is_empty() {
        output.push('\n');
    }

    output.push_str(&format!("SHA-256: {}\n", hex::encode(summary.digest)));

    Ok(output)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::kind::Kind;
    use crate::model::Model;
    use tempfile::tempdir;

    #[test]
    fn test_show_info() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save.dat");
        let config = ModelConfig::default().with_save_path(&path).with_seed(2);

        let mut model: Model<i32> = Model::new(config);
        model.activate(Kind::Queue);
        model.activate(Kind::Insertion);
        model.add(5, false).unwrap();
        model.add(6, false).unwrap();
        model.save().unwrap();

        let info = show_info(&path).unwrap();
        assert!(info.contains("Records: 2"));
        assert!(info.contains("queue:\n  Elements: 2"));
        assert!(info.contains("insertion:\n  Elements: 12"));
        assert!(info.contains("State: sorting"));
        assert!(info.contains("SHA-256: "));
    }

    #[test]
    fn test_show_info_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("junk.dat");
        std::fs::write(&path, b"not a save file at all, no sir").unwrap();
        assert!(show_info(&path).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1048576), "1.0 MB");
    }
}
