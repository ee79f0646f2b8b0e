//! Package access
//!
//! A package is read into memory as an ordered list of named parts. The
//! patch and merge flows mutate only the document and style-definitions
//! parts; everything else (content types, relationships, media, fonts) is
//! carried through to the rebuilt archive byte for byte.

use crate::error::{PackageError, PackageResult};
use patch_engine::{extract_styles, StyleInfo};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use wml_tree::{parse_document, tags, write_document, Element};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Archive path of the main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Archive path of the style-definitions part
pub const STYLES_PART: &str = "word/styles.xml";
/// Archive path of the content-types part
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// An in-memory wordprocessing package
#[derive(Debug, Clone, Default)]
pub struct DocxPackage {
    parts: Vec<(String, Vec<u8>)>,
}

impl DocxPackage {
    /// An empty package with no parts
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a package from anything seekable
    pub fn from_reader<R: Read + Seek>(reader: R) -> PackageResult<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            parts.push((file.name().to_string(), data));
        }
        Ok(Self { parts })
    }

    /// Read a package from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> PackageResult<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Read a package from disk
    pub fn from_path(path: &Path) -> PackageResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Look up a part by archive path
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(part_name, _)| part_name == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Replace a part's content in place, or append a new part
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|(part_name, _)| part_name == name) {
            Some(slot) => slot.1 = data,
            None => self.parts.push((name.to_string(), data)),
        }
    }

    /// The archive paths of every part, in archive order
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    /// Check for the two parts every wordprocessing package must carry
    pub fn is_wordprocessing_package(&self) -> bool {
        self.part(CONTENT_TYPES_PART).is_some() && self.part(DOCUMENT_PART).is_some()
    }

    /// Parse the main document part into a tree
    pub fn document_tree(&self) -> PackageResult<Element> {
        let data = self
            .part(DOCUMENT_PART)
            .ok_or_else(|| PackageError::MissingPart(DOCUMENT_PART.to_string()))?;
        Ok(parse_document(&String::from_utf8_lossy(data))?)
    }

    /// Parse the style-definitions part into a tree
    ///
    /// A package without one yields an empty definitions root: no styles is
    /// data, not an error.
    pub fn styles_tree(&self) -> PackageResult<Element> {
        match self.part(STYLES_PART) {
            Some(data) => Ok(parse_document(&String::from_utf8_lossy(data))?),
            None => Ok(Element::new(tags::STYLES)),
        }
    }

    /// Extract the identity of every style the package defines
    pub fn style_infos(&self) -> Vec<StyleInfo> {
        match self.styles_tree() {
            Ok(styles) => extract_styles(&styles),
            Err(err) => {
                tracing::warn!(error = %err, "failed to parse style definitions; treating as empty");
                Vec::new()
            }
        }
    }

    /// Serialize a tree back into the main document part
    pub fn store_document_tree(&mut self, tree: &Element) {
        self.set_part(DOCUMENT_PART, write_document(tree).into_bytes());
    }

    /// Serialize a tree back into the style-definitions part
    pub fn store_styles_tree(&mut self, tree: &Element) {
        self.set_part(STYLES_PART, write_document(tree).into_bytes());
    }

    /// Rebuild the zipped archive
    pub fn to_bytes(&self) -> PackageResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, data) in &self.parts {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(data)?;
        }
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// Rebuild the archive and write it to disk
    pub fn to_path(&self, path: &Path) -> PackageResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_package(document_xml: &str, styles_xml: Option<&str>) -> DocxPackage {
        let mut package = DocxPackage::new();
        package.set_part(
            CONTENT_TYPES_PART,
            br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#.to_vec(),
        );
        package.set_part(DOCUMENT_PART, document_xml.as_bytes().to_vec());
        if let Some(styles) = styles_xml {
            package.set_part(STYLES_PART, styles.as_bytes().to_vec());
        }
        package
    }

    #[test]
    fn test_round_trip_preserves_untouched_parts() {
        let mut package = minimal_package("<w:document><w:body/></w:document>", None);
        package.set_part("word/media/image1.png", vec![0x89, 0x50, 0x4e, 0x47]);

        let bytes = package.to_bytes().unwrap();
        let reread = DocxPackage::from_bytes(&bytes).unwrap();

        assert_eq!(reread.part("word/media/image1.png"), Some(&[0x89u8, 0x50, 0x4e, 0x47][..]));
        assert!(reread.is_wordprocessing_package());
        let names: Vec<&str> = reread.part_names().collect();
        assert_eq!(names, vec![CONTENT_TYPES_PART, DOCUMENT_PART, "word/media/image1.png"]);
    }

    #[test]
    fn test_document_tree_requires_the_part() {
        let package = DocxPackage::new();
        assert!(matches!(
            package.document_tree(),
            Err(PackageError::MissingPart(_))
        ));
    }

    #[test]
    fn test_missing_styles_part_is_an_empty_style_set() {
        let package = minimal_package("<w:document><w:body/></w:document>", None);
        let styles = package.styles_tree().unwrap();
        assert_eq!(styles.name, tags::STYLES);
        assert!(package.style_infos().is_empty());
    }

    #[test]
    fn test_store_document_tree_round_trips() {
        let mut package = minimal_package(
            r#"<w:document><w:body><w:p><w:r><w:t>old</w:t></w:r></w:p></w:body></w:document>"#,
            None,
        );
        let mut tree = package.document_tree().unwrap();
        tree.find_descendant_mut(tags::TEXT).unwrap().children.clear();
        tree.find_descendant_mut(tags::TEXT).unwrap().push_text("new");
        package.store_document_tree(&tree);

        let reread = package.document_tree().unwrap();
        assert_eq!(reread.find_descendant(tags::PARAGRAPH).unwrap().text(), "new");
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(DocxPackage::from_bytes(b"not a zip archive").is_err());
    }
}
