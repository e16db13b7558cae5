use camino::Utf8Path;
use std::fmt;

/// Suffix appended to a recognized extension to mark a mod as disabled.
pub const DISABLED_SUFFIX: &str = "bak";

/// Recognized mod file types.
///
/// Matching against on-disk extensions is case-insensitive. Adding a new
/// format means adding a variant here and to [`ModKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModKind {
    /// `.esp` plugin
    Plugin,
    /// `.esm` master file
    Master,
    /// `.bsa` asset archive
    Archive,
}

impl ModKind {
    pub const ALL: [ModKind; 3] = [ModKind::Plugin, ModKind::Master, ModKind::Archive];

    /// Lowercase extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ModKind::Plugin => "esp",
            ModKind::Master => "esm",
            ModKind::Archive => "bsa",
        }
    }

    /// Upper-case label for the listing's type column.
    pub fn label(self) -> &'static str {
        match self {
            ModKind::Plugin => "ESP",
            ModKind::Master => "ESM",
            ModKind::Archive => "BSA",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.extension().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for ModKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Enabled/disabled state of a mod, decoded from its file name.
///
/// `Foo.esp` is `Enabled(Plugin)`, `Foo.esp.bak` is `Disabled(Plugin)`.
/// Conversion to and from names happens only through [`ModState::classify`]
/// and [`ModState::file_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModState {
    Enabled(ModKind),
    Disabled(ModKind),
}

impl ModState {
    /// Decode a file name into `(stem, state)`.
    ///
    /// Returns `None` for anything that is neither `<stem>.<ext>` nor
    /// `<stem>.<ext>.bak` with a recognized `<ext>` and a non-empty stem.
    pub fn classify(name: &str) -> Option<(&str, ModState)> {
        let path = Utf8Path::new(name);
        if path.file_name() != Some(name) {
            return None;
        }

        let ext = path.extension()?;
        let stem = path.file_stem()?;

        if let Some(kind) = ModKind::from_extension(ext) {
            return Some((stem, ModState::Enabled(kind)));
        }

        if ext.eq_ignore_ascii_case(DISABLED_SUFFIX) {
            let inner = Utf8Path::new(stem);
            let kind = ModKind::from_extension(inner.extension()?)?;
            return Some((inner.file_stem()?, ModState::Disabled(kind)));
        }

        None
    }

    /// Render the on-disk file name for `stem` in this state.
    ///
    /// Always uses the lowercase extension; callers that need to preserve the
    /// original casing should go through [`toggled_name`].
    pub fn file_name(self, stem: &str) -> String {
        match self {
            ModState::Enabled(kind) => format!("{stem}.{}", kind.extension()),
            ModState::Disabled(kind) => format!("{stem}.{}.{DISABLED_SUFFIX}", kind.extension()),
        }
    }

    pub fn kind(self) -> ModKind {
        match self {
            ModState::Enabled(kind) | ModState::Disabled(kind) => kind,
        }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, ModState::Enabled(_))
    }

    pub fn toggled(self) -> ModState {
        match self {
            ModState::Enabled(kind) => ModState::Disabled(kind),
            ModState::Disabled(kind) => ModState::Enabled(kind),
        }
    }
}

/// Compute the name a mod file gets after toggling its state.
///
/// Enabling strips exactly one trailing disabled suffix; disabling appends
/// one. The recognized extension keeps whatever casing it had on disk, so
/// applying this twice returns the original name.
///
/// Returns `None` if `name` is not a toggleable mod file name.
pub fn toggled_name(name: &str) -> Option<String> {
    let (_, state) = ModState::classify(name)?;
    match state {
        ModState::Enabled(_) => Some(format!("{name}.{DISABLED_SUFFIX}")),
        ModState::Disabled(_) => {
            // classify guarantees a trailing ".bak" of some casing
            let cut = name.len() - DISABLED_SUFFIX.len() - 1;
            Some(name[..cut].to_string())
        }
    }
}

/// A mod file entry, materialized by a directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mod {
    /// File name including extension(s), as found on disk.
    pub name: String,
    pub state: ModState,
    /// File size read at scan time.
    pub size_bytes: u64,
}

impl Mod {
    pub fn kind(&self) -> ModKind {
        self.state.kind()
    }

    /// Lowercase recognized extension, ignoring any disabled suffix.
    pub fn extension(&self) -> &'static str {
        self.state.kind().extension()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Size in MiB, as shown in the listing.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_enabled() { "Enabled" } else { "Disabled" }
    }
}
