/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::TranscodeOptions;
use crate::emit::{self, GeneratedModule, ModuleOutput};
use crate::error::{Result, TranscodeError};
use crate::resource::{self, ImageResource};

/// Where a module's header and source land inside the output folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub header: PathBuf,
    pub source: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub struct Transcoder {
    opts: TranscodeOptions,
}

impl Transcoder {
    pub fn new(opts: TranscodeOptions) -> Self {
        Transcoder { opts }
    }

    /// Converts every image in `input_folder` and writes `{module_name}.h` plus its
    /// source file into `output_folder`. Nothing is written unless every image converts.
    pub fn transcode(
        &self,
        input_folder: &Path,
        module_name: &str,
        output_folder: &Path,
    ) -> Result<GeneratedModule> {
        let module = self.render(input_folder, module_name)?;
        let paths = self.write(&module, output_folder)?;
        info!(
            header = %paths.header.display(),
            source = %paths.source.display(),
            "wrote {} image(s)",
            module.resource_count
        );
        Ok(module)
    }

    /// Builds the header and source text without touching the filesystem beyond reads.
    pub fn render(&self, input_folder: &Path, module_name: &str) -> Result<GeneratedModule> {
        if !emit::is_identifier(module_name) {
            return Err(TranscodeError::InvalidModuleName(module_name.to_string()));
        }

        let mut output = ModuleOutput::new(module_name, self.opts.bytes_per_line);
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for path in self.list_files(input_folder)? {
            let stem = resource::symbol_stem(&resource::base_name(&path));
            if let Some(first) = seen.get(&stem) {
                return Err(TranscodeError::DuplicateResourceName {
                    stem,
                    first: first.clone(),
                    second: path,
                });
            }

            let res = ImageResource::load(&path, &self.opts)?;
            output.push(&res);
            seen.insert(stem, res.source_path);
        }

        Ok(output.finish())
    }

    pub fn output_paths(&self, module_name: &str, output_folder: &Path) -> OutputPaths {
        let ext = self.opts.source_extension.trim_start_matches('.');
        OutputPaths {
            header: output_folder.join(format!("{module_name}.h")),
            source: output_folder.join(format!("{module_name}.{ext}")),
        }
    }

    /// Commits both files through temporary siblings. On failure neither new file is
    /// left behind and a previous source file is restored.
    pub fn write(&self, module: &GeneratedModule, output_folder: &Path) -> Result<OutputPaths> {
        fs::create_dir_all(output_folder).map_err(|source| TranscodeError::OutputWrite {
            path: output_folder.to_path_buf(),
            source,
        })?;

        let paths = self.output_paths(&module.module_name, output_folder);
        let header_tmp = temp_sibling(&paths.header, "tmp");
        let source_tmp = temp_sibling(&paths.source, "tmp");

        let committed = write_file(&header_tmp, &module.header_text)
            .and_then(|()| write_file(&source_tmp, &module.source_text))
            .and_then(|()| commit(&paths, &header_tmp, &source_tmp));

        if committed.is_err() {
            discard(&header_tmp);
            discard(&source_tmp);
        }

        committed.map(|()| paths)
    }

    fn list_files(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let input_error = |source: io::Error| TranscodeError::InputFolder {
            path: folder.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(folder).map_err(input_error)? {
            let entry = entry.map_err(input_error)?;
            let path = entry.path();

            if self.opts.skip_hidden && entry.file_name().to_string_lossy().starts_with('.') {
                debug!(path = %path.display(), "skipping hidden entry");
                continue;
            }

            // follows symlinks
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => debug!(path = %path.display(), "skipping non-file entry"),
                Err(e) => warn!(path = %path.display(), "skipping unreadable entry: {e}"),
            }
        }

        // read_dir order is platform dependent
        files.sort();
        Ok(files)
    }
}

/// Transcodes with [`TranscodeOptions::default`].
pub fn transcode(
    input_folder: &Path,
    module_name: &str,
    output_folder: &Path,
) -> Result<GeneratedModule> {
    Transcoder::default().transcode(input_folder, module_name, output_folder)
}

/// Moves the staged files into place, source first so the header is the last thing to
/// change. A header failure puts the previous source back.
fn commit(paths: &OutputPaths, header_tmp: &Path, source_tmp: &Path) -> Result<()> {
    let source_bak = temp_sibling(&paths.source, "bak");
    let had_source = paths.source.is_file();

    if had_source {
        rename(&paths.source, &source_bak)?;
    }

    let replaced =
        rename(source_tmp, &paths.source).and_then(|()| rename(header_tmp, &paths.header));
    match replaced {
        Ok(()) => {
            if had_source {
                discard(&source_bak);
            }
            Ok(())
        }
        Err(e) => {
            if had_source {
                if let Err(restore) = fs::rename(&source_bak, &paths.source) {
                    warn!(path = %paths.source.display(), "failed to restore source: {restore}");
                }
            } else {
                discard(&paths.source);
            }
            Err(e)
        }
    }
}

fn temp_sibling(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{suffix}"))
}

fn discard(path: &Path) {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "failed to remove file: {e}");
        }
        _ => {}
    }
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| TranscodeError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| TranscodeError::OutputWrite {
        path: to.to_path_buf(),
        source,
    })
}
