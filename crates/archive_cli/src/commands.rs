//! Command implementations over an open archive

use anyhow::{Context, Result};
use archive_core::{
    identify_category, Archive, FileCategory, FileContent, LineEnding, LogicalFile, Volume,
};
use std::io::Write;
use std::path::Path;

/// Print every file under the volume root
pub fn list(archive: &Archive, out: &mut impl Write) -> Result<()> {
    for entry in archive.try_list()? {
        writeln!(
            out,
            "{}\t{}\t{}",
            entry.name,
            entry.size,
            entry.modified.map_or_else(|| "-".to_string(), |m| m.to_string())
        )?;
    }
    Ok(())
}

/// Print a file's text, or a summary line for bytecode
pub fn cat(archive: &mut Archive, name: &str, newest: bool, out: &mut impl Write) -> Result<()> {
    let file = archive
        .try_load(name, newest)
        .with_context(|| format!("cannot load {:?}", name))?;

    match file.content() {
        FileContent::Text(text) => write!(out, "{}", text)?,
        FileContent::Binary(bytes) => {
            writeln!(out, "<{}: {} bytes of compiled bytecode>", file.name(), bytes.len())?
        }
    }
    Ok(())
}

/// Store a host file in the archive under `name`
pub fn save(archive: &mut Archive, name: &str, source: &Path, compiled: bool) -> Result<()> {
    let bytes = std::fs::read(source)
        .with_context(|| format!("cannot read {}", source.display()))?;

    let category = identify_category(&bytes);
    let file = if compiled || category == FileCategory::Ksm {
        LogicalFile::bytecode(name, bytes)
    } else {
        let text = String::from_utf8(bytes)
            .with_context(|| format!("{} is not UTF-8 text", source.display()))?;
        LogicalFile::text(name, category, LineEnding::normalize(&text))
    };

    let path = archive.try_save(&file)?;
    tracing::info!("Stored {} as {}", source.display(), path.display());
    Ok(())
}

pub fn remove(archive: &mut Archive, name: &str) -> Result<()> {
    archive.try_delete(name)?;
    Ok(())
}

pub fn rename(archive: &mut Archive, name: &str, new_name: &str) -> Result<()> {
    let destination = archive.try_rename(name, new_name)?;
    tracing::info!("{} -> {}", name, destination.display());
    Ok(())
}

/// Print volume facts
pub fn info(archive: &Archive, out: &mut impl Write) -> Result<()> {
    writeln!(out, "volume:        {}", archive.name())?;
    writeln!(out, "root:          {}", archive.root().display())?;
    writeln!(out, "renameable:    {}", archive.renameable())?;
    writeln!(out, "power:         {}", archive.required_power())?;
    writeln!(out, "line endings:  {:?}", archive.line_ending())?;
    writeln!(out, "files on disk: {}", archive.list().len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_save_cat_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = Archive::new(dir.path().join("Archive")).with_line_ending(LineEnding::Lf);

        let source = dir.path().join("boot.txt");
        fs::write(&source, "print 1.\r\nprint 2.\r\n").unwrap();
        save(&mut archive, "boot", &source, false).unwrap();

        let mut out = Vec::new();
        cat(&mut archive, "boot", false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "print 1.\nprint 2.\n");

        let mut out = Vec::new();
        list(&archive, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("boot.ks\t18\t"));
    }

    #[test]
    fn test_save_compiled() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = Archive::new(dir.path().join("Archive"));

        let source = dir.path().join("prog.bin");
        fs::write(&source, [b'k', 0x03, b'X', b'E', 0x00]).unwrap();
        save(&mut archive, "prog", &source, true).unwrap();

        let mut out = Vec::new();
        cat(&mut archive, "prog", false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<prog: 5 bytes of compiled bytecode>\n"
        );
    }

    #[test]
    fn test_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = Archive::new(dir.path());
        assert!(cat(&mut archive, "ghost", false, &mut Vec::new()).is_err());
        assert!(remove(&mut archive, "ghost").is_err());
        assert!(rename(&mut archive, "ghost", "spirit").is_err());
    }
}
