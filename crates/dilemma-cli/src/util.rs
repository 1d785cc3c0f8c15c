use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::Serialize;

/// Destination of the JSON documents written by the subcommands.
#[derive(Debug)]
pub(crate) enum JsonSink {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl JsonSink {
    /// Creates (truncating) the file at `path`, or locks stdout when `None`.
    pub(crate) fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Stdout(io::stdout().lock()));
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Stdout(_) => "stdout".to_owned(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes `value` as pretty-printed JSON followed by a newline.
    pub(crate) fn write<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        let target = self.describe();
        let writer = self.writer();
        serde_json::to_writer_pretty(&mut *writer, value)
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to flush JSON to {target}"))?;
        Ok(())
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(writer) => writer,
            Self::File { writer, .. } => writer,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_write_to_file() {
        let path = env::temp_dir().join(format!("dilemma-sink-{}.json", process::id()));
        let sink = JsonSink::create(Some(&path)).unwrap();
        assert_eq!(sink.describe(), path.display().to_string());
        sink.write(&[1, 2, 3]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        let value: Vec<u32> = serde_json::from_str(&written).unwrap();
        assert_eq!(value, [1, 2, 3]);
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let path = Path::new("/nonexistent-dilemma-dir/out.json");
        let err = JsonSink::create(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
