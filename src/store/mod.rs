use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not find collection with name: {0}")]
    CollectionNotFound(String),
    #[error("Unsupported store format: {0}")]
    UnsupportedFormat(String),
    #[error("Malformed document {id:?} in {collection}: {reason}")]
    MalformedDocument {
        collection: String,
        id: String,
        reason: String,
    },
}

/// A stored document: a JSON object carrying its own `id`.
pub type Document = Map<String, Value>;

/// Read access to a document database.
pub trait DocumentStore {
    /// Every document of the collection.
    fn collection(&self, name: &str) -> Result<Vec<Document>, self::Error>;

    /// One document by id, `None` if the collection has no such document.
    fn document(&self, name: &str, id: &str) -> Result<Option<Document>, self::Error> {
        Ok(self
            .collection(name)?
            .into_iter()
            .find(|doc| document_id(doc) == Some(id)))
    }
}

pub fn document_id(doc: &Document) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

/// Decodes a document into one of the shapes in [`models`].
pub fn decode<T: DeserializeOwned>(collection: &str, doc: Document) -> Result<T, self::Error> {
    let id = document_id(&doc).unwrap_or_default().to_string();
    serde_json::from_value(Value::Object(doc)).map_err(|err| self::Error::MalformedDocument {
        collection: collection.to_string(),
        id,
        reason: err.to_string(),
    })
}

#[derive(Default, Debug, Clone)]
pub enum StorageType {
    #[default]
    None,
    Directory(PathBuf),
    Zip(PathBuf),
}

/// Collections exported to files, one `<collection>.json` (array of objects)
/// or `<collection>.csv` per collection, either in a directory or in a zip.
#[derive(Default, Debug, Clone)]
pub struct FileStore {
    storage: StorageType,
}

impl FileStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Directory(path.as_ref().to_path_buf());
        self
    }

    pub fn from_zip<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.as_ref().to_path_buf());
        self
    }

    /// Picks the storage type from the path: a `.zip` file or a directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, self::Error> {
        let path = path.as_ref();
        if path.is_dir() {
            Ok(Self::new().from_directory(path))
        } else if path.extension().is_some_and(|ext| ext == "zip") {
            Ok(Self::new().from_zip(path))
        } else if !path.exists() {
            Err(io::Error::new(io::ErrorKind::NotFound, path.display().to_string()).into())
        } else {
            Err(self::Error::UnsupportedFormat(path.display().to_string()))
        }
    }

    pub fn storage(&self) -> &StorageType {
        &self.storage
    }
}

impl DocumentStore for FileStore {
    fn collection(&self, name: &str) -> Result<Vec<Document>, self::Error> {
        match &self.storage {
            StorageType::None => Ok(Vec::new()),
            StorageType::Directory(path) => collection_from_directory(path, name),
            StorageType::Zip(path) => collection_from_zip(path, name),
        }
    }
}

fn collection_from_directory(dir: &Path, name: &str) -> Result<Vec<Document>, self::Error> {
    let json_path = dir.join(format!("{name}.json"));
    if json_path.is_file() {
        return parse_json(File::open(json_path)?);
    }
    let csv_path = dir.join(format!("{name}.csv"));
    if csv_path.is_file() {
        return parse_csv(File::open(csv_path)?);
    }
    Err(self::Error::CollectionNotFound(name.to_string()))
}

fn collection_from_zip(zip_path: &Path, name: &str) -> Result<Vec<Document>, self::Error> {
    let zip_file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    if let Some(index) = archive.index_for_name(&format!("{name}.json")) {
        return parse_json(archive.by_index(index)?);
    }
    if let Some(index) = archive.index_for_name(&format!("{name}.csv")) {
        return parse_csv(archive.by_index(index)?);
    }
    Err(self::Error::CollectionNotFound(name.to_string()))
}

fn parse_json<R: Read>(reader: R) -> Result<Vec<Document>, self::Error> {
    Ok(serde_json::from_reader(reader)?)
}

/// Rows become flat documents of strings. Dotted headers such as
/// `current_location.latitude` become nested objects.
fn parse_csv<R: Read>(reader: R) -> Result<Vec<Document>, self::Error> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut docs = Vec::new();
    for result in rdr.deserialize() {
        let row: HashMap<String, String> = result?;
        let mut doc = Document::new();
        for (key, value) in row {
            insert_path(&mut doc, &key, Value::String(value));
        }
        docs.push(doc);
    }
    Ok(docs)
}

fn insert_path(doc: &mut Document, path: &str, value: Value) {
    match path.split_once('.') {
        Some((head, rest)) => {
            let child = doc
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child) = child {
                insert_path(child, rest, value);
            }
        }
        None => {
            doc.insert(path.to_string(), value);
        }
    }
}

/// Collections held in memory.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_collection(mut self, name: &str, docs: Vec<Document>) -> Self {
        self.collections.insert(name.to_string(), docs);
        self
    }

    pub fn insert(&mut self, name: &str, doc: Document) {
        self.collections
            .entry(name.to_string())
            .or_default()
            .push(doc);
    }
}

impl DocumentStore for MemoryStore {
    fn collection(&self, name: &str) -> Result<Vec<Document>, self::Error> {
        self.collections
            .get(name)
            .cloned()
            .ok_or_else(|| self::Error::CollectionNotFound(name.to_string()))
    }
}

#[test]
fn csv_dotted_header_test() {
    let data = "id,current_location.latitude,current_location.longitude\nbus-1,12.5,77.25\n";
    let docs = parse_csv(data.as_bytes()).unwrap();
    assert_eq!(docs.len(), 1);
    let location = docs[0].get("current_location").unwrap();
    assert_eq!(location.get("latitude"), Some(&Value::String("12.5".into())));
}
