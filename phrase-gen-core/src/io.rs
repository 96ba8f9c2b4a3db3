use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Reads a corpus file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Lists the stems of all files with a given extension in a directory.
///
/// `corpus.txt` is returned as `corpus`. The result is sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(stem) = path.file_stem() {
				files.push(stem.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[test]
	fn reads_lines_with_mixed_endings() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("corpus.txt");
		fs::write(&path, "first line\r\nsecond line\nthird").unwrap();

		let lines = read_lines(&path).unwrap();
		assert_eq!(lines, vec!["first line", "second line", "third"]);
	}

	#[test]
	fn missing_file_is_an_error() {
		let dir = tempdir().unwrap();
		assert!(read_lines(dir.path().join("missing.txt")).is_err());
	}

	#[test]
	fn lists_matching_stems() {
		let dir = tempdir().unwrap();
		fs::write(dir.path().join("b.txt"), "").unwrap();
		fs::write(dir.path().join("a.txt"), "").unwrap();
		fs::write(dir.path().join("ignored.bin"), "").unwrap();
		fs::create_dir(dir.path().join("nested.txt")).unwrap();

		assert_eq!(list_files(dir.path(), "txt").unwrap(), vec!["a", "b"]);
	}
}
