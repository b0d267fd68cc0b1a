use std::path::{Path, PathBuf};

use lopdf::Document;
use tracing::warn;
use walkdir::WalkDir;

pub fn extract_pdf_text(path: &Path) -> String {
    match read_page_texts(path) {
        Ok(pages) => pages.join("\n").trim().to_string(),
        Err(error) => {
            warn!(path = %path.display(), %error, "pdf text extraction failed");
            String::new()
        }
    }
}

fn read_page_texts(path: &Path) -> Result<Vec<String>, lopdf::Error> {
    let document = Document::load(path)?;

    let mut pages = Vec::new();
    for (page_no, _page_id) in document.get_pages() {
        pages.push(document.extract_text(&[page_no])?);
    }

    Ok(pages)
}

pub fn discover_resume_files(folder: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::{discover_resume_files, extract_pdf_text};
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn unreadable_pdf_extracts_to_empty_string() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.4\n%not a real pdf")?;

        assert_eq!(extract_pdf_text(&path), "");
        Ok(())
    }

    #[test]
    fn missing_file_extracts_to_empty_string() {
        assert_eq!(extract_pdf_text(Path::new("/nonexistent/resume.pdf")), "");
    }

    #[test]
    fn discovery_is_recursive_and_sorted() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let base = dir.path();
        let nested = base.join("nested");
        fs::create_dir(&nested)?;

        File::create(nested.join("b.PDF")).and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        File::create(base.join("a.pdf")).and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        File::create(base.join("notes.txt")).and_then(|mut file| file.write_all(b"plain text"))?;

        let files = discover_resume_files(base);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0], base.join("a.pdf"));
        assert_eq!(files[1], nested.join("b.PDF"));
        Ok(())
    }
}
