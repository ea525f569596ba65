pub const DEFAULT_ROMFS_ROOT_PATH: &str = "assets/romfs";
pub const DEFAULT_INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterSettings {
    romfs_root_path: String,
    indent: String,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        ConverterSettings {
            romfs_root_path: DEFAULT_ROMFS_ROOT_PATH.to_owned(),
            indent: DEFAULT_INDENT.to_owned(),
        }
    }
}

impl ConverterSettings {
    pub fn new() -> Self {
        ConverterSettings::default()
    }

    /// Sets the `RomFs.RootPath` written for containers that carry a RomFS.
    pub fn romfs_root_path(mut self, path: impl Into<String>) -> Self {
        self.romfs_root_path = path.into();
        self
    }

    /// Sets the indent written once per nesting level.
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn get_romfs_root_path(&self) -> &str {
        &self.romfs_root_path
    }

    pub fn get_indent(&self) -> &str {
        &self.indent
    }
}
