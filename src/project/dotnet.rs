//! Stamps a version into .NET SDK project files (`*.csproj`, `*.fsproj`, ...).
//!
//! The `<Version>` element of the first `<PropertyGroup>` under `<Project>` is
//! replaced, or added to that group when missing. Everything else in the file
//! is written back as it was read.

use crate::error::{Result, VersionError};
use crate::project::ProjectFileUpdater;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const PROJECT: &[u8] = b"Project";
const PROPERTY_GROUP: &[u8] = b"PropertyGroup";
const VERSION: &str = "Version";

/// Updates every project file matching a glob pattern
pub struct DotnetProjectUpdater {
    root: PathBuf,
}

impl DotnetProjectUpdater {
    /// Relative patterns are resolved against `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        DotnetProjectUpdater {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn matching_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            self.root.join(pattern).to_string_lossy().into_owned()
        };

        let mut files = Vec::new();
        for entry in glob::glob(&full_pattern)? {
            let path = entry.map_err(|e| {
                VersionError::project_file(e.path().display().to_string(), e.error().to_string())
            })?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl ProjectFileUpdater for DotnetProjectUpdater {
    fn update(&self, pattern: &str, version: &str) -> Result<Vec<PathBuf>> {
        info!("Updating .NET project files...");
        info!("Pattern: {}", pattern);

        let files = self.matching_files(pattern)?;
        info!("Found {} projects.", files.len());

        for file in &files {
            update_project_version(file, version)?;
        }

        info!("Done.");
        Ok(files)
    }
}

/// Rewrite one project file with the given version
pub fn update_project_version(path: &Path, version: &str) -> Result<()> {
    info!("{} -> {}", path.display(), version);

    let display = path.display().to_string();
    let content = fs::read_to_string(path)
        .map_err(|e| VersionError::project_file(&display, format!("cannot read: {}", e)))?;

    let updated = set_project_version(&content, version)
        .map_err(|reason| VersionError::project_file(&display, reason))?;

    fs::write(path, updated)
        .map_err(|e| VersionError::project_file(&display, format!("cannot write: {}", e)))?;

    Ok(())
}

/// Return `content` with the project version set to `version`
pub fn set_project_version(content: &str, version: &str) -> std::result::Result<String, String> {
    let mut reader = Reader::from_str(content);
    let mut writer = Writer::new(Vec::new());

    let mut depth = 0usize;
    let mut saw_project = false;
    let mut saw_group = false;
    let mut in_first_group = false;
    let mut in_version = false;
    let mut version_written = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("malformed XML at byte {}: {}", reader.buffer_position(), e))?;

        match event {
            Event::Eof => break,
            Event::Start(start) => {
                depth += 1;
                let name = start.name();
                if depth == 1 {
                    if name.as_ref() != PROJECT {
                        return Err(unexpected_root(name.as_ref()));
                    }
                    saw_project = true;
                } else if depth == 2 && name.as_ref() == PROPERTY_GROUP && !saw_group {
                    saw_group = true;
                    in_first_group = true;
                } else if in_first_group && depth == 3 && name.as_ref() == VERSION.as_bytes() {
                    write(&mut writer, Event::Start(start))?;
                    write_text(&mut writer, version)?;
                    in_version = true;
                    version_written = true;
                    continue;
                }

                if !in_version {
                    write(&mut writer, Event::Start(start))?;
                }
            }
            Event::Empty(empty) => {
                let name = empty.name();
                if depth == 0 {
                    return Err(if name.as_ref() == PROJECT {
                        "no <PropertyGroup> in <Project>".to_string()
                    } else {
                        unexpected_root(name.as_ref())
                    });
                } else if depth == 1 && name.as_ref() == PROPERTY_GROUP && !saw_group {
                    saw_group = true;
                    version_written = true;
                    let end = empty.to_end().into_owned();
                    write(&mut writer, Event::Start(empty))?;
                    write_version_element(&mut writer, version)?;
                    write(&mut writer, Event::End(end))?;
                } else if in_first_group && depth == 2 && name.as_ref() == VERSION.as_bytes() {
                    version_written = true;
                    write_version_element(&mut writer, version)?;
                } else if !in_version {
                    write(&mut writer, Event::Empty(empty))?;
                }
            }
            Event::End(end) => {
                if in_version && depth == 3 {
                    in_version = false;
                    write(&mut writer, Event::End(end))?;
                } else if in_first_group && depth == 2 {
                    if !version_written {
                        write_version_element(&mut writer, version)?;
                        version_written = true;
                    }
                    in_first_group = false;
                    write(&mut writer, Event::End(end))?;
                } else if !in_version {
                    write(&mut writer, Event::End(end))?;
                }
                depth = depth.saturating_sub(1);
            }
            other => {
                if !in_version {
                    write(&mut writer, other)?;
                }
            }
        }
    }

    if !saw_project {
        return Err("missing <Project> root element".to_string());
    }
    if depth != 0 {
        return Err("unexpected end of file inside an open element".to_string());
    }
    if !saw_group || !version_written {
        return Err("no <PropertyGroup> in <Project>".to_string());
    }

    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

fn unexpected_root(name: &[u8]) -> String {
    format!(
        "expected <Project> root element, found <{}>",
        String::from_utf8_lossy(name)
    )
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> std::result::Result<(), String> {
    writer.write_event(event).map_err(|e| e.to_string())
}

fn write_text(writer: &mut Writer<Vec<u8>>, text: &str) -> std::result::Result<(), String> {
    write(writer, Event::Text(BytesText::new(text)))
}

fn write_version_element(
    writer: &mut Writer<Vec<u8>>,
    version: &str,
) -> std::result::Result<(), String> {
    write(writer, Event::Start(BytesStart::new(VERSION)))?;
    write_text(writer, version)?;
    write(writer, Event::End(BytesEnd::new(VERSION)))
}
