use crate::error::{EngineError, Result};
use filetime::FileTime;
use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A script in the source directory, as seen at enumeration time.
///
/// `name` is the display form used in events and logs; `file_name` is the
/// exact name the destination copy is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub file_name: OsString,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// File-name matcher for the configured glob (e.g. `*.lua`).
#[derive(Debug, Clone)]
pub struct ScriptMatcher {
    matcher: GlobMatcher,
}

impl ScriptMatcher {
    /// # Errors
    /// Returns an error if `pattern` is not a valid glob.
    pub fn new(pattern: &str) -> Result<Self> {
        let matcher = Glob::new(pattern)?.compile_matcher();
        Ok(Self { matcher })
    }

    /// Only the final path component is matched, so `*.lua` never
    /// depends on where the source directory lives.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(Path::new(name)))
    }
}

/// List matching files directly inside `source_dir` (no recursion), sorted by name.
///
/// # Errors
/// Any failure to read the directory or an entry is fatal: a partial listing
/// would silently skip scripts.
pub fn list_scripts(source_dir: &Path, matcher: &ScriptMatcher) -> Result<Vec<SourceFile>> {
    let meta = fs::metadata(source_dir).map_err(|e| EngineError::SourceRead {
        path: source_dir.to_path_buf(),
        source: e,
    })?;
    if !meta.is_dir() {
        return Err(EngineError::SourceRead {
            path: source_dir.to_path_buf(),
            source: std::io::Error::from(ErrorKind::NotADirectory),
        });
    }

    let walker = WalkBuilder::new(source_dir)
        .standard_filters(false)
        .follow_links(true)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !matcher.matches(path) {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let modified = entry
            .metadata()?
            .modified()
            .map_err(|e| EngineError::Metadata {
                path: path.to_path_buf(),
                source: e,
            })?;
        files.push(SourceFile {
            name: file_name.to_string_lossy().into_owned(),
            file_name: file_name.to_os_string(),
            path: path.to_path_buf(),
            modified,
        });
    }

    Ok(files)
}

/// Create `dir` and its parents if missing.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| EngineError::CreateDest {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Decide whether `dest` must be (re)written from a source modified at `source_modified`.
///
/// Missing destinations always need a copy; otherwise only a strictly newer
/// source wins.
///
/// # Errors
/// Returns an error if the destination exists but its metadata cannot be read.
pub fn needs_copy(source_modified: SystemTime, dest: &Path, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    match fs::metadata(dest) {
        Ok(meta) => {
            let dest_modified = meta.modified().map_err(|e| EngineError::Metadata {
                path: dest.to_path_buf(),
                source: e,
            })?;
            Ok(source_modified > dest_modified)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(e) => Err(EngineError::Metadata {
            path: dest.to_path_buf(),
            source: e,
        }),
    }
}

/// Copy bytes and permission bits, then carry over access and modification times.
///
/// Returns the source modification time that was applied to `to`.
///
/// # Errors
/// Returns [`EngineError::SameFile`] if `from` and `to` name the same file
/// (through a symlink or identical directories), and [`EngineError::Copy`]
/// if any other step fails.
pub fn copy_preserving(from: &Path, to: &Path) -> Result<SystemTime> {
    // Copying a file onto itself truncates it before any byte is read.
    if same_file::is_same_file(from, to).unwrap_or(false) {
        return Err(EngineError::SameFile {
            path: from.to_path_buf(),
        });
    }

    let copy_err = |source| EngineError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    let meta = fs::metadata(from).map_err(copy_err)?;
    let modified = meta.modified().map_err(copy_err)?;
    fs::copy(from, to).map_err(copy_err)?;

    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(to, atime, mtime).map_err(copy_err)?;

    Ok(modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::set_file_mtime;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn matcher_uses_file_name_only() {
        let matcher = ScriptMatcher::new("*.lua").unwrap();

        assert!(matcher.matches(Path::new("/some/dir/a.lua")));
        assert!(matcher.matches(Path::new("b.lua")));
        assert!(!matcher.matches(Path::new("/dir.lua/notes.txt")));
        assert!(!matcher.matches(Path::new("a.lua.bak")));
    }

    #[test]
    fn matcher_rejects_invalid_glob() {
        assert!(matches!(
            ScriptMatcher::new("[unclosed"),
            Err(EngineError::Pattern(_))
        ));
    }

    #[test]
    fn lists_only_matching_top_level_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.lua", "b");
        write(tmp.path(), "a.lua", "a");
        write(tmp.path(), "readme.md", "docs");
        fs::create_dir(tmp.path().join("nested")).unwrap();
        write(&tmp.path().join("nested"), "deep.lua", "deep");
        fs::create_dir(tmp.path().join("folder.lua")).unwrap();

        let matcher = ScriptMatcher::new("*.lua").unwrap();
        let files = list_scripts(tmp.path(), &matcher).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, ["a.lua", "b.lua"]);
        assert_eq!(files[0].path, tmp.path().join("a.lua"));
    }

    #[test]
    fn hidden_scripts_are_listed() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".init.lua", "x");

        let matcher = ScriptMatcher::new("*.lua").unwrap();
        let files = list_scripts(tmp.path(), &matcher).unwrap();

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_source_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let matcher = ScriptMatcher::new("*.lua").unwrap();

        let err = list_scripts(&tmp.path().join("nope"), &matcher).unwrap_err();
        assert!(matches!(err, EngineError::SourceRead { .. }));
    }

    #[test]
    fn file_as_source_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "a.lua", "a");
        let matcher = ScriptMatcher::new("*.lua").unwrap();

        assert!(matches!(
            list_scripts(&file, &matcher),
            Err(EngineError::SourceRead { .. })
        ));
    }

    #[test]
    fn needs_copy_compares_mtimes() {
        let tmp = TempDir::new().unwrap();
        let dest = write(tmp.path(), "a.lua", "old");
        set_file_mtime(&dest, FileTime::from_unix_time(1_000, 0)).unwrap();

        let older = FileTime::from_unix_time(900, 0);
        let same = FileTime::from_unix_time(1_000, 0);
        let newer = FileTime::from_unix_time(1_100, 0);
        let to_system = |ft: FileTime| {
            SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(ft.unix_seconds() as u64)
        };

        assert!(!needs_copy(to_system(older), &dest, false).unwrap());
        assert!(!needs_copy(to_system(same), &dest, false).unwrap());
        assert!(needs_copy(to_system(newer), &dest, false).unwrap());
        assert!(needs_copy(to_system(older), &dest, true).unwrap());
        assert!(needs_copy(to_system(older), &tmp.path().join("missing.lua"), false).unwrap());
    }

    #[test]
    fn copy_preserves_content_and_mtime() {
        let src_dir = TempDir::new().unwrap();
        let dst_dir = TempDir::new().unwrap();
        let src = write(src_dir.path(), "a.lua", "print('hi')");
        let mtime = FileTime::from_unix_time(1_600_000_000, 0);
        set_file_mtime(&src, mtime).unwrap();

        let dst = dst_dir.path().join("a.lua");
        copy_preserving(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "print('hi')");
        let copied = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
        assert_eq!(copied, mtime);
    }

    #[cfg(unix)]
    #[test]
    fn copy_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let src_dir = TempDir::new().unwrap();
        let dst_dir = TempDir::new().unwrap();
        let src = write(src_dir.path(), "run.lua", "x");
        fs::set_permissions(&src, fs::Permissions::from_mode(0o750)).unwrap();

        let dst = dst_dir.path().join("run.lua");
        copy_preserving(&src, &dst).unwrap();

        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o750);
    }

    #[test]
    fn copy_into_missing_directory_fails() {
        let src_dir = TempDir::new().unwrap();
        let src = write(src_dir.path(), "a.lua", "x");

        let err = copy_preserving(&src, &src_dir.path().join("missing/a.lua")).unwrap_err();
        assert!(matches!(err, EngineError::Copy { .. }));
    }

    #[test]
    fn copy_onto_itself_is_refused() {
        let tmp = TempDir::new().unwrap();
        let src = write(tmp.path(), "a.lua", "print('keep')");

        let err = copy_preserving(&src, &tmp.path().join(".").join("a.lua")).unwrap_err();

        assert!(matches!(err, EngineError::SameFile { .. }));
        assert_eq!(fs::read_to_string(&src).unwrap(), "print('keep')");
    }

    #[cfg(unix)]
    #[test]
    fn copy_through_symlinked_directory_is_refused() {
        let tmp = TempDir::new().unwrap();
        let src = write(tmp.path(), "a.lua", "print('keep')");
        let other = TempDir::new().unwrap();
        let link = other.path().join("scripts");
        std::os::unix::fs::symlink(tmp.path(), &link).unwrap();

        let err = copy_preserving(&src, &link.join("a.lua")).unwrap_err();

        assert!(matches!(err, EngineError::SameFile { .. }));
        assert_eq!(fs::read_to_string(&src).unwrap(), "print('keep')");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_kept_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"caf\xe9.lua");
        fs::write(tmp.path().join(raw), "x").unwrap();

        let matcher = ScriptMatcher::new("*.lua").unwrap();
        let files = list_scripts(tmp.path(), &matcher).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name.as_os_str(), raw);
        assert_eq!(files[0].name, "caf\u{fffd}.lua");
    }

    #[test]
    fn ensure_dir_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b/scripts");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
