use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

const ZIP_MAGIC: [&[u8]; 2] = [b"PK\x03\x04", b"PK\x05\x06"];
const SEVEN_Z_MAGIC: &[u8] = b"7z\xBC\xAF\x27\x1C";

/// Archive container formats accepted by [`install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    SevenZip,
}

impl ArchiveFormat {
    /// Extensions offered by file pickers.
    pub const EXTENSIONS: [&'static str; 2] = ["zip", "7z"];

    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension()?;
        if ext.eq_ignore_ascii_case("zip") {
            Some(ArchiveFormat::Zip)
        } else if ext.eq_ignore_ascii_case("7z") {
            Some(ArchiveFormat::SevenZip)
        } else {
            None
        }
    }

    fn matches_signature(self, header: &[u8]) -> bool {
        match self {
            ArchiveFormat::Zip => ZIP_MAGIC.iter().any(|magic| header.starts_with(magic)),
            ArchiveFormat::SevenZip => header.starts_with(SEVEN_Z_MAGIC),
        }
    }
}

/// Errors that can occur when installing a mod archive
///
/// `entries_written > 0` on [`Corrupt`](InstallError::Corrupt) or
/// [`Extraction`](InstallError::Extraction) means the destination holds a
/// partial install; there is no rollback. The entry being written when the
/// failure hit is removed.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Cannot read archive {path}: {source}")]
    Unreadable {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported archive format: {0} (expected .zip or .7z)")]
    UnsupportedFormat(Utf8PathBuf),

    #[error("Archive {path} is corrupt: {reason}")]
    Corrupt {
        path: Utf8PathBuf,
        reason: String,
        entries_written: usize,
    },

    #[error("Destination directory not found: {0}")]
    DestinationNotFound(Utf8PathBuf),

    #[error("Extraction failed after writing {entries_written} entries: {source}")]
    Extraction {
        entries_written: usize,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    /// True if some entries reached the destination before the failure.
    pub fn is_partial(&self) -> bool {
        match self {
            InstallError::Corrupt {
                entries_written, ..
            }
            | InstallError::Extraction {
                entries_written, ..
            } => *entries_written > 0,
            _ => false,
        }
    }
}

/// Outcome of a successful install
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Files written (directories not counted)
    pub files_written: usize,
    /// Entries skipped because their path would escape the destination
    pub entries_skipped: usize,
}

/// Extract every entry of `archive` into `dest`, keeping relative paths.
///
/// Existing files with the same name are overwritten. The archive handle
/// is scoped to this call and released on every exit path.
pub fn install(archive: &Utf8Path, dest: &Utf8Path) -> Result<InstallReport, InstallError> {
    let format = ArchiveFormat::from_path(archive)
        .ok_or_else(|| InstallError::UnsupportedFormat(archive.to_path_buf()))?;

    check_signature(archive, format)?;

    if !dest.is_dir() {
        return Err(InstallError::DestinationNotFound(dest.to_path_buf()));
    }

    tracing::info!("Installing {} ({:?}) into {}", archive, format, dest);

    let report = match format {
        ArchiveFormat::Zip => extract_zip(archive, dest)?,
        ArchiveFormat::SevenZip => extract_7z(archive, dest)?,
    };

    tracing::info!(
        "Installed {}: {} files written, {} entries skipped",
        archive,
        report.files_written,
        report.entries_skipped
    );
    Ok(report)
}

fn check_signature(archive: &Utf8Path, format: ArchiveFormat) -> Result<(), InstallError> {
    let unreadable = |source| InstallError::Unreadable {
        path: archive.to_path_buf(),
        source,
    };

    let mut file = fs::File::open(archive).map_err(unreadable)?;
    let mut header = Vec::with_capacity(SEVEN_Z_MAGIC.len());
    Read::by_ref(&mut file)
        .take(SEVEN_Z_MAGIC.len() as u64)
        .read_to_end(&mut header)
        .map_err(unreadable)?;

    if format.matches_signature(&header) {
        Ok(())
    } else {
        Err(InstallError::Corrupt {
            path: archive.to_path_buf(),
            reason: format!("missing {:?} signature", format),
            entries_written: 0,
        })
    }
}

fn extract_zip(archive_path: &Utf8Path, dest: &Utf8Path) -> Result<InstallReport, InstallError> {
    let file = fs::File::open(archive_path).map_err(|source| InstallError::Unreadable {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| InstallError::Corrupt {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
        entries_written: 0,
    })?;

    let mut report = InstallReport::default();

    let failed = |report: &InstallReport, source: io::Error| InstallError::Extraction {
        entries_written: report.files_written,
        source,
    };
    let corrupt = |report: &InstallReport, reason: String| InstallError::Corrupt {
        path: archive_path.to_path_buf(),
        reason,
        entries_written: report.files_written,
    };

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| match e {
            zip::result::ZipError::Io(source) => InstallError::Unreadable {
                path: archive_path.to_path_buf(),
                source,
            },
            other => corrupt(&report, other.to_string()),
        })?;

        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("Skipping unsafe archive entry: {}", entry.name());
            report.entries_skipped += 1;
            continue;
        };
        let out_path = dest.as_std_path().join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| failed(&report, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| failed(&report, e))?;
        }

        match copy_to_file(&mut entry, &out_path) {
            Ok(()) => {}
            Err(CopyError::Read(e)) => {
                return Err(corrupt(&report, format!("{}: {}", entry.name(), e)));
            }
            Err(CopyError::Write(e)) => return Err(failed(&report, e)),
        }

        tracing::debug!("Extracted {}", out_path.display());
        report.files_written += 1;
    }

    Ok(report)
}

fn extract_7z(archive_path: &Utf8Path, dest: &Utf8Path) -> Result<InstallReport, InstallError> {
    let mut archive =
        sevenz_rust::SevenZReader::open(archive_path.as_std_path(), sevenz_rust::Password::empty())
            .map_err(|e| InstallError::Corrupt {
                path: archive_path.to_path_buf(),
                reason: e.to_string(),
                entries_written: 0,
            })?;

    let mut report = InstallReport::default();
    // Set when the failure came from writing an entry rather than decoding the archive
    let mut write_error: Option<io::Error> = None;

    let result = archive.for_each_entries(|entry, reader| {
        let relative = enclosed_name(entry.name())
            .filter(|path| entry.is_directory() || !path.as_os_str().is_empty());
        let Some(relative) = relative else {
            tracing::warn!("Skipping unsafe archive entry: {}", entry.name());
            report.entries_skipped += 1;
            // Solid blocks must still be read past
            io::copy(reader, &mut io::sink())?;
            return Ok(true);
        };
        if relative.as_os_str().is_empty() {
            // Archive root directory
            return Ok(true);
        }
        let out_path = dest.as_std_path().join(relative);

        match write_entry(&out_path, entry.is_directory(), reader) {
            Ok(true) => {
                tracing::debug!("Extracted {}", out_path.display());
                report.files_written += 1;
                Ok(true)
            }
            Ok(false) => Ok(true),
            Err(CopyError::Write(e)) => {
                write_error = Some(io::Error::new(e.kind(), e.to_string()));
                Err(e.into())
            }
            Err(CopyError::Read(e)) => Err(e.into()),
        }
    });

    // Release the archive handle before reporting
    drop(archive);

    match (result, write_error) {
        (Ok(()), _) => Ok(report),
        (Err(_), Some(source)) => Err(InstallError::Extraction {
            entries_written: report.files_written,
            source,
        }),
        (Err(e), None) => Err(InstallError::Corrupt {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
            entries_written: report.files_written,
        }),
    }
}

/// Side of an entry copy that failed.
enum CopyError {
    /// Decoding the entry (bad checksum, truncated stream)
    Read(io::Error),
    /// Creating or writing the destination file
    Write(io::Error),
}

/// Write one 7z entry. Returns `true` if a file was written.
fn write_entry(out_path: &Path, is_dir: bool, reader: &mut dyn Read) -> Result<bool, CopyError> {
    if is_dir {
        fs::create_dir_all(out_path).map_err(CopyError::Write)?;
        return Ok(false);
    }

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(CopyError::Write)?;
    }
    copy_to_file(reader, out_path)?;
    Ok(true)
}

/// Stream `reader` into a new file at `out_path`, removing the file if the copy fails.
fn copy_to_file(reader: &mut dyn Read, out_path: &Path) -> Result<(), CopyError> {
    let mut out_file = fs::File::create(out_path).map_err(CopyError::Write)?;
    let result = copy_chunks(reader, &mut out_file);
    drop(out_file);

    if result.is_err() {
        if let Err(e) = fs::remove_file(out_path) {
            tracing::warn!(
                "Failed to remove incomplete file {}: {}",
                out_path.display(),
                e
            );
        }
    }
    result
}

fn copy_chunks(reader: &mut dyn Read, writer: &mut impl Write) -> Result<(), CopyError> {
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };
        writer.write_all(&buf[..n]).map_err(CopyError::Write)?;
    }
}

/// Relative path for an archive entry name, or `None` if it would escape the destination.
///
/// A name with no normal components (`""`, `"."`) maps to the empty path.
fn enclosed_name(name: &str) -> Option<PathBuf> {
    let normalized = name.replace('\\', "/");
    let mut path = PathBuf::new();

    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(path)
}
