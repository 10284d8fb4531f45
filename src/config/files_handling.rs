
use ndarray::Array2;
use ndarray_npy::{read_npy, write_npy};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::tfidf::Features;

/// Documents of a corpus file, one per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus(pub Vec<String>);

pub fn read_input<R: ReadFile>(file_path: impl AsRef<Path>) -> Result<R> {
    R::read_file(file_path.as_ref())
}

pub fn save_output<S: SaveFile>(output_dir: impl AsRef<Path>, file_name: &str, item: &S) -> Result<PathBuf> {

    // create output folder
    fs::create_dir_all(output_dir.as_ref())?;
    item.save_file(output_dir.as_ref(), file_name)
}

// `file_path` is the path without the extension the implementation appends,
// except for `Corpus` which reads the given path as is.
pub trait ReadFile: Sized {
    fn read_file(file_path: &Path) -> Result<Self>;
}

pub trait SaveFile {
    fn save_file(&self, output_dir: &Path, file_name: &str) -> Result<PathBuf>;
}

fn with_extension(file_path: &Path, extension: &str) -> PathBuf {
    let mut path = file_path.as_os_str().to_owned();
    path.push(extension);
    PathBuf::from(path)
}

impl ReadFile for Corpus {
    fn read_file(file_path: &Path) -> Result<Self> {

        let f = File::open(file_path)?;
        let reader: Box<dyn BufRead> = match file_path.extension() {
            Some(ext) if ext == "gz" => Box::new(BufReader::new(GzDecoder::new(f))),
            _ => Box::new(BufReader::new(f))
        };

        let documents = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        Ok(Corpus(documents))
    }
}

impl ReadFile for Array2<f32> {
    fn read_file(file_path: &Path) -> Result<Self> {
        let item = read_npy(with_extension(file_path, ".npy"))?;
        Ok(item)
    }
}

impl ReadFile for HashMap<String, usize> {
    fn read_file(file_path: &Path) -> Result<Self> {
        let f = BufReader::new(File::open(with_extension(file_path, ".json"))?);
        let item = serde_json::from_reader(f)?;
        Ok(item)
    }
}

impl ReadFile for Vec<String> {
    fn read_file(file_path: &Path) -> Result<Self> {
        let f = BufReader::new(File::open(with_extension(file_path, ".json"))?);
        let item = serde_json::from_reader(f)?;
        Ok(item)
    }
}

impl ReadFile for Features {
    fn read_file(file_path: &Path) -> Result<Self> {
        let f = BufReader::new(File::open(with_extension(file_path, ".bin.gz"))?);
        let item = bincode::deserialize_from(GzDecoder::new(f))?;
        Ok(item)
    }
}

impl SaveFile for Array2<f32> {
    fn save_file(&self, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
        let out = output_dir.join(format!("{}.npy", file_name));
        write_npy(&out, self)?;
        Ok(out)
    }
}

impl SaveFile for HashMap<String, usize> {
    fn save_file(&self, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
        let out = output_dir.join(format!("{}.json", file_name));
        let mut f = BufWriter::new(File::create(&out)?);
        serde_json::to_writer(&mut f, self)?;
        f.flush()?;
        Ok(out)
    }
}

impl SaveFile for Vec<String> {
    fn save_file(&self, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
        let out = output_dir.join(format!("{}.json", file_name));
        let mut f = BufWriter::new(File::create(&out)?);
        serde_json::to_writer(&mut f, self)?;
        f.flush()?;
        Ok(out)
    }
}

impl SaveFile for Features {
    fn save_file(&self, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
        let out = output_dir.join(format!("{}.bin.gz", file_name));
        let f = BufWriter::new(File::create(&out)?);
        let mut writer = GzEncoder::new(f, Compression::default());
        bincode::serialize_into(&mut writer, self)?;
        writer.finish()?.flush()?;
        Ok(out)
    }
}
