//! Loads transport records from a folder of text files.
//!
//! Every `.txt` and `.csv` file under the data folder (recursively) is read
//! line by line. Blank lines, `#` comments and lines without a comma (titles,
//! separators) are skipped. A line that looks like a record but fails to parse
//! is logged and skipped; it never aborts the load.
//!
//! Each loaded transport then has a random share of its seats marked as
//! already sold, so a fresh server does not start with empty vehicles.

mod error;
mod occupancy;
mod record;

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::domain::Transport;
use crate::inventory::Inventory;

pub use error::LoadError;
pub use occupancy::pre_occupy;
pub use record::{FIELD_COUNT, RecordError, parse_record};

/// Default folder scanned for transport files.
pub const DEFAULT_DATA_DIR: &str = "./transport files";

/// Where to load transports from and how full to make them.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Folder scanned recursively for `.txt` and `.csv` files.
    pub data_dir: PathBuf,

    /// Lower bound of the share of seats pre-occupied per transport.
    pub min_occupancy: f64,

    /// Upper bound of the share of seats pre-occupied per transport.
    pub max_occupancy: f64,

    /// Seed for the occupancy RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl LoaderConfig {
    /// Create a configuration. Occupancy bounds are clamped to `0.0..=1.0`
    /// and swapped if given in the wrong order.
    pub fn new(
        data_dir: impl Into<PathBuf>,
        min_occupancy: f64,
        max_occupancy: f64,
        seed: Option<u64>,
    ) -> Self {
        let lo = min_occupancy.clamp(0.0, 1.0);
        let hi = max_occupancy.clamp(0.0, 1.0);
        Self {
            data_dir: data_dir.into(),
            min_occupancy: lo.min(hi),
            max_occupancy: lo.max(hi),
            seed,
        }
    }

    /// Same folder and seed, but no seats pre-occupied.
    pub fn empty_vehicles(mut self) -> Self {
        self.min_occupancy = 0.0;
        self.max_occupancy = 0.0;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR, 0.20, 0.40, None)
    }
}

/// Load every transport under the configured folder.
///
/// # Errors
///
/// - `DirectoryNotFound` if the folder is missing
/// - `Io` if a directory or file cannot be read
/// - `NoTransports` if no file yields a valid record
pub fn load_inventory(config: &LoaderConfig) -> Result<Inventory, LoadError> {
    let dir = &config.data_dir;
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.clone()));
    }

    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    // read_dir order is platform-dependent.
    files.sort();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut transports = Vec::new();
    for path in &files {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

        let loaded = parse_lines(path, &content);
        debug!(file = %path.display(), transports = loaded.len(), "read transport file");
        transports.extend(loaded);
    }

    if transports.is_empty() {
        return Err(LoadError::NoTransports(dir.clone()));
    }

    for transport in &transports {
        pre_occupy(
            transport,
            config.min_occupancy,
            config.max_occupancy,
            &mut rng,
        );
    }

    let inventory = Inventory::new(transports);
    info!(
        dir = %dir.display(),
        files = files.len(),
        transports = inventory.len(),
        capacity = inventory.capacity(),
        "loaded transport inventory"
    );
    Ok(inventory)
}

/// Parse the records in one file's contents, skipping anything that is not a
/// valid record.
pub fn parse_lines(path: &Path, content: &str) -> Vec<Transport> {
    let mut transports = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || !line.contains(',') {
            continue;
        }

        match parse_record(line) {
            Ok(transport) => transports.push(transport),
            Err(e) => warn!(
                file = %path.display(),
                line = index + 1,
                error = %e,
                "skipping malformed transport record"
            ),
        }
    }

    transports
}

/// Recursively gather `.txt` and `.csv` files.
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if is_transport_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_transport_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("csv"))
}
