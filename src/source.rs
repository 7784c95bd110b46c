//! Source Loader Module
//!
//! ディレクトリまたはZIPアーカイブから全ファイルを読み込み、
//! ベースファイル名 → バイト列の[`RawFileSet`]を構築するモジュール。
//! どちらの入力でも同じ形を返すため、後段の処理は入力形式を意識しません。

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::ZipArchive;

use crate::api::InputKind;
use crate::encoding::decode_entry_name;
use crate::error::{Result, ViewerError};
use crate::security::{LoadBudget, SecurityConfig};
use crate::types::RawFileSet;

/// 入力パスの種類を判定する
///
/// ディレクトリであれば[`InputKind::Directory`]、拡張子が`.zip`（大文字小文字を区別しない）
/// であれば[`InputKind::Archive`]を返します。
///
/// # 戻り値
///
/// * `Err(ViewerError::Stat)` - パスが存在しない、またはメタデータを取得できない場合
/// * `Err(ViewerError::UnsupportedInput)` - ディレクトリでもZIPでもない場合
pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    let metadata = fs::metadata(path).map_err(|source| ViewerError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_dir() {
        Ok(InputKind::Directory)
    } else if path.to_string_lossy().to_lowercase().ends_with(".zip") {
        Ok(InputKind::Archive)
    } else {
        Err(ViewerError::UnsupportedInput {
            path: path.to_path_buf(),
        })
    }
}

/// 入力パスから全ファイルを読み込む
///
/// 読み込みエラーが1つでもあれば、部分的な結果は返さずに全体を失敗させます。
pub fn load_source(path: &Path, security: &SecurityConfig) -> Result<RawFileSet> {
    let files = match detect_input_kind(path)? {
        InputKind::Directory => read_directory(path, security)?,
        InputKind::Archive => read_zip_file(path, security)?,
    };

    tracing::info!(
        "Loaded {} files ({} bytes) from {}",
        files.len(),
        files.total_size(),
        path.display()
    );
    Ok(files)
}

/// ディレクトリを再帰的に走査し、ディレクトリ以外のすべてのファイルを読み込む
///
/// 走査はファイル名順に行うため、同名ファイルの上書き結果は実行ごとに変わりません。
fn read_directory(dir: &Path, security: &SecurityConfig) -> Result<RawFileSet> {
    let mut files = RawFileSet::new();
    let mut budget = LoadBudget::new(security);

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let declared_size = entry.metadata()?.len();
        budget.admit(&name, declared_size)?;

        let file = File::open(entry.path()).map_err(|source| read_error(entry.path(), source))?;
        let data = budget
            .read_limited(file)
            .map_err(|source| read_error(entry.path(), source))?;
        budget.consume(&name, data.len() as u64)?;

        tracing::debug!("Read {} ({} bytes)", entry.path().display(), data.len());
        if files.insert(name, data).is_some() {
            tracing::debug!(
                "Duplicate file name, keeping the later one: {}",
                entry.path().display()
            );
        }
    }

    Ok(files)
}

/// ZIPアーカイブ内のすべてのエントリを展開して読み込む
fn read_zip_file(zip_path: &Path, security: &SecurityConfig) -> Result<RawFileSet> {
    let file = File::open(zip_path).map_err(|source| read_error(zip_path, source))?;
    let input_size = file
        .metadata()
        .map_err(|source| ViewerError::Stat {
            path: zip_path.to_path_buf(),
            source,
        })?
        .len();
    security.check_input_size(input_size)?;

    let mut archive = ZipArchive::new(file).map_err(|source| ViewerError::ArchiveOpen {
        path: zip_path.to_path_buf(),
        source,
    })?;

    let mut files = RawFileSet::new();
    let mut budget = LoadBudget::new(security);

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| ViewerError::ArchiveEntry { index, source })?;
        if entry.is_dir() {
            continue;
        }

        let entry_name = decode_entry_name(entry.name_raw());
        let name = base_name(&entry_name).to_string();
        if name.is_empty() {
            continue;
        }
        budget.admit(&name, entry.size())?;

        let data = budget
            .read_limited(&mut entry)
            .map_err(|source| read_error(Path::new(&entry_name), source))?;
        budget.consume(&name, data.len() as u64)?;

        tracing::debug!("Extracted {} ({} bytes)", entry_name, data.len());
        files.insert(name, data);
    }

    Ok(files)
}

/// パスの最後の要素を返す（`/`と`\`の両方を区切りとみなす）
pub(crate) fn base_name(name: &str) -> &str {
    name.rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(name)
}

fn read_error(path: &Path, source: std::io::Error) -> ViewerError {
    ViewerError::Read {
        path: PathBuf::from(path),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::write::{FileOptions, ZipWriter};

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            for (name, content) in entries {
                zip.start_file(*name, FileOptions::default()).unwrap();
                zip.write_all(content).unwrap();
            }
            zip.finish().unwrap();
        }
        fs::write(path, buffer).unwrap();
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/c.xml"), "c.xml");
        assert_eq!(base_name("a\\b\\c.csv"), "c.csv");
        assert_eq!(base_name("c.xml"), "c.xml");
        assert_eq!(base_name("dir/"), "");
    }

    #[test]
    fn test_detect_input_kind() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_input_kind(dir.path()).unwrap(), InputKind::Directory);

        let archive = dir.path().join("BUNDLE.ZIP");
        write_zip(&archive, &[]);
        assert_eq!(detect_input_kind(&archive).unwrap(), InputKind::Archive);

        let text = dir.path().join("notes.txt");
        fs::write(&text, "x").unwrap();
        assert!(matches!(
            detect_input_kind(&text),
            Err(ViewerError::UnsupportedInput { .. })
        ));

        assert!(matches!(
            detect_input_kind(&dir.path().join("missing")),
            Err(ViewerError::Stat { .. })
        ));
    }

    #[test]
    fn test_read_directory_recursively_by_base_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("top.xml"), "<DOC/>").unwrap();
        fs::write(dir.path().join("nested/deeper/data.csv"), "a,b").unwrap();

        let files = load_source(dir.path(), &SecurityConfig::default()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files.get("top.xml"), Some(&b"<DOC/>"[..]));
        assert_eq!(files.get("data.csv"), Some(&b"a,b"[..]));
    }

    #[test]
    fn test_read_directory_duplicate_names_keep_later_entry() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/same.csv"), "first").unwrap();
        fs::write(dir.path().join("b/same.csv"), "second").unwrap();

        let files = load_source(dir.path(), &SecurityConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files.get("same.csv"), Some(&b"second"[..]));
    }

    #[test]
    fn test_read_zip_file_strips_directories() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("input.zip");
        write_zip(
            &archive,
            &[("folder/notice.xml", b"<DOC/>"), ("table.csv", b"x,y")],
        );

        let files = load_source(&archive, &SecurityConfig::default()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files.get("notice.xml"), Some(&b"<DOC/>"[..]));
        assert_eq!(files.get("table.csv"), Some(&b"x,y"[..]));
    }

    #[test]
    fn test_read_zip_file_rejects_invalid_archive() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"this is not a zip").unwrap();

        match load_source(&archive, &SecurityConfig::default()) {
            Err(ViewerError::ArchiveOpen { path, .. }) => assert_eq!(path, archive),
            other => panic!("Expected ArchiveOpen error, got {:?}", other),
        }
    }

    #[test]
    fn test_zip_file_count_ignores_directory_entries() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("nested.zip");
        {
            let mut zip = ZipWriter::new(fs::File::create(&archive).unwrap());
            zip.add_directory("a/", FileOptions::default()).unwrap();
            zip.add_directory("a/b/", FileOptions::default()).unwrap();
            zip.start_file("a/notice.xml", FileOptions::default()).unwrap();
            zip.write_all(b"<DOC/>").unwrap();
            zip.start_file("a/b/table.csv", FileOptions::default()).unwrap();
            zip.write_all(b"x,y").unwrap();
            zip.finish().unwrap();
        }

        // 4エントリのうちファイルは2つなので、ディレクトリ入力と同じく上限2で通る
        let security = SecurityConfig {
            max_file_count: 2,
            ..SecurityConfig::default()
        };
        let files = load_source(&archive, &security).unwrap();
        assert_eq!(files.len(), 2);

        let tight = SecurityConfig {
            max_file_count: 1,
            ..SecurityConfig::default()
        };
        assert!(matches!(
            load_source(&archive, &tight),
            Err(ViewerError::SecurityViolation(_))
        ));
    }

    #[test]
    fn test_read_directory_enforces_file_size_limit() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("big.csv"), vec![b'a'; 32]).unwrap();

        let security = SecurityConfig {
            max_file_size: 16,
            max_decompressed_size: 1024,
            ..SecurityConfig::default()
        };
        assert!(matches!(
            load_source(dir.path(), &security),
            Err(ViewerError::SecurityViolation(_))
        ));
    }
}
