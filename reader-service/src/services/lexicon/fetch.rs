//! First-run provisioning of the WordNet dict files.

use super::{LexiconError, PartOfSpeech};
use futures::StreamExt;
use std::path::{Path, PathBuf};

/// Every file [`super::WordNet::load`] reads.
pub fn required_files() -> Vec<String> {
    PartOfSpeech::ALL
        .iter()
        .flat_map(|pos| {
            let suffix = pos.file_suffix();
            [
                format!("index.{}", suffix),
                format!("data.{}", suffix),
                format!("{}.exc", suffix),
            ]
        })
        .collect()
}

pub fn is_complete(dir: &Path) -> bool {
    required_files().iter().all(|name| dir.join(name).is_file())
}

/// Make sure `dir` holds the dict files, downloading the release tarball once
/// when they are missing and `auto_download` is set.
pub async fn ensure_dataset(dir: &Path, url: &str, auto_download: bool) -> Result<(), LexiconError> {
    if is_complete(dir) {
        tracing::debug!(dir = ?dir, "Lexical database present");
        return Ok(());
    }
    if !auto_download {
        return Err(LexiconError::Missing(dir.to_path_buf()));
    }

    tracing::info!(dir = ?dir, url = %url, "Lexical database missing, downloading");
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| LexiconError::io(dir, e))?;

    let tarball = download(dir, url).await?;

    let dest = dir.to_path_buf();
    let extracted = tokio::task::spawn_blocking(move || unpack_dict(tarball.path(), &dest))
        .await
        .map_err(|e| LexiconError::Download(format!("unpack task failed: {}", e)))??;

    tracing::info!(dir = ?dir, files = extracted, "Lexical database installed");

    if is_complete(dir) {
        Ok(())
    } else {
        Err(LexiconError::Download(format!(
            "archive at {} does not contain the WordNet dict files",
            url
        )))
    }
}

/// Stream the tarball into a temp file next to the dataset.
async fn download(dir: &Path, url: &str) -> Result<tempfile::NamedTempFile, LexiconError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| LexiconError::Download(e.to_string()))?;

    if !response.status().is_success() {
        return Err(LexiconError::Download(format!(
            "HTTP error: {}",
            response.status()
        )));
    }

    let mut out = tempfile::Builder::new()
        .prefix("wordnet-")
        .suffix(".tar.gz")
        .tempfile_in(dir)
        .map_err(|e| LexiconError::io(dir, e))?;

    let mut stream = response.bytes_stream();
    let mut bytes_downloaded: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| LexiconError::Download(e.to_string()))?;
        std::io::Write::write_all(&mut out, &chunk).map_err(|e| LexiconError::io(out.path(), e))?;
        bytes_downloaded += chunk.len() as u64;
    }
    std::io::Write::flush(&mut out).map_err(|e| LexiconError::io(out.path(), e))?;

    tracing::debug!(bytes = bytes_downloaded, "Lexical database downloaded");
    Ok(out)
}

/// Copy `*/dict/<required file>` entries of a `.tar.gz` into `dest`.
///
/// Entries are staged in a scratch directory and moved into place one by one,
/// so an interrupted unpack never leaves a truncated file under its final name.
pub fn unpack_dict(tarball: &Path, dest: &Path) -> Result<usize, LexiconError> {
    let wanted = required_files();
    let staging = tempfile::TempDir::new_in(dest).map_err(|e| LexiconError::io(dest, e))?;

    let file = std::fs::File::open(tarball).map_err(|e| LexiconError::io(tarball, e))?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);

    let bad_archive = |e: std::io::Error| LexiconError::Download(format!("invalid archive: {}", e));
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();

    for entry in archive.entries().map_err(bad_archive)? {
        let mut entry = entry.map_err(bad_archive)?;
        let path = entry.path().map_err(bad_archive)?.into_owned();

        let in_dict = path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|parent| parent == "dict");
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if !in_dict || !wanted.contains(&name) {
            continue;
        }

        let tmp = staging.path().join(&name);
        entry.unpack(&tmp).map_err(|e| LexiconError::io(&tmp, e))?;
        staged.push((tmp, dest.join(&name)));
    }

    for (from, to) in &staged {
        std::fs::rename(from, to).map_err(|e| LexiconError::io(to, e))?;
    }

    Ok(staged.len())
}
