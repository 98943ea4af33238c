use dc_core::error::Result;
use dc_core::{ARCHIVE_EXTENSION, OsEntryStore, compress, extract, list};
use std::path::{Path, PathBuf};

fn invalid(msg: String) -> dc_core::DcError {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, msg).into()
}

pub fn handle_compress(dir: PathBuf, out_file: Option<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Err(invalid(format!(
            "not a directory or does not exist: {}",
            dir.display()
        )));
    }
    let out = match out_file {
        Some(path) => path,
        None => default_archive_path(&dir)?,
    };
    compress(&OsEntryStore, &dir, &out)
}

pub fn handle_decompress(archive: PathBuf, out_dir: Option<PathBuf>) -> Result<()> {
    if !archive.is_file() {
        return Err(invalid(format!(
            "not a file or does not exist: {}",
            archive.display()
        )));
    }
    let dest = match out_dir {
        Some(dir) => {
            if !dir.is_dir() {
                return Err(invalid(format!(
                    "output is not a directory or does not exist: {}",
                    dir.display()
                )));
            }
            dir
        }
        None => archive
            .canonicalize()?
            .parent()
            .ok_or_else(|| invalid("archive has no parent directory".into()))?
            .to_path_buf(),
    };
    extract(&OsEntryStore, &archive, &dest)
}

pub fn handle_list(archive: PathBuf) -> Result<()> {
    for entry in list(&OsEntryStore, &archive)? {
        if entry.is_dir {
            println!("{}/", entry.path);
        } else {
            println!("{}  {} bytes", entry.path, entry.size);
        }
    }
    Ok(())
}

/// `<parent(dir)>/<name(dir)>.dc`, the default compress target.
fn default_archive_path(dir: &Path) -> Result<PathBuf> {
    let dir = dir.canonicalize()?;
    let name = dir
        .file_name()
        .ok_or_else(|| invalid("directory has no name".into()))?;
    let parent = dir
        .parent()
        .ok_or_else(|| invalid("directory has no parent to place the archive in".into()))?;
    let mut file_name = name.to_os_string();
    file_name.push(".");
    file_name.push(ARCHIVE_EXTENSION);
    Ok(parent.join(file_name))
}
