//! Shared harness for the HTTP tests: a router wired to a stub extractor, a
//! miniature WordNet written to a temp dir and the mock text provider.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use reader_service::config::{
    ExtractionConfig, GeminiSettings, LexiconConfig, ReaderConfig, UploadConfig,
};
use reader_service::services::extraction::{ExtractionError, TextExtractor};
use reader_service::services::lexicon::WordNet;
use reader_service::services::providers::mock::{MockBehavior, MockTextProvider};
use reader_service::services::uploads::UploadArea;
use reader_service::startup::{build_router, AppState};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "reader-test-boundary";

/// What the stub extractor does with a file.
#[derive(Clone)]
pub enum StubOutcome {
    Pages(Vec<String>),
    Unreadable(String),
    TimedOut,
}

/// Extractor that returns canned pages and remembers whether the uploaded
/// file existed while it was being "parsed".
pub struct StubExtractor {
    outcome: StubOutcome,
    seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl StubExtractor {
    pub fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextExtractor for StubExtractor {
    async fn extract_pages(&self, file_path: &Path) -> Result<Vec<String>, ExtractionError> {
        self.seen
            .lock()
            .unwrap()
            .push((file_path.to_path_buf(), file_path.is_file()));

        match &self.outcome {
            StubOutcome::Pages(pages) => Ok(pages.clone()),
            StubOutcome::Unreadable(msg) => Err(ExtractionError::Unreadable(msg.clone())),
            StubOutcome::TimedOut => Err(ExtractionError::TimedOut(5)),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub struct TestOptions {
    pub extraction: StubOutcome,
    pub behavior: MockBehavior,
    pub max_bytes: usize,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            extraction: StubOutcome::Pages(Vec::new()),
            behavior: MockBehavior::Echo,
            max_bytes: 1024 * 1024,
        }
    }
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub provider: Arc<MockTextProvider>,
    pub extractor: Arc<StubExtractor>,
    pub upload_dir: PathBuf,
    _root: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::with_options(TestOptions::default()).await
    }

    pub async fn with_options(options: TestOptions) -> Self {
        let root = tempfile::tempdir().unwrap();
        let upload_dir = root.path().join("uploads");
        let lexicon_dir = root.path().join("wordnet");
        write_wordnet_fixture(&lexicon_dir);

        let config = test_config(&upload_dir, &lexicon_dir, options.max_bytes);
        let uploads = UploadArea::new(&upload_dir).await.unwrap();
        let lexicon = WordNet::load(&lexicon_dir).unwrap();
        let provider = Arc::new(MockTextProvider::new(options.behavior));
        let extractor = Arc::new(StubExtractor::new(options.extraction));

        let state = AppState {
            config,
            extractor: extractor.clone(),
            lexicon: Arc::new(lexicon),
            text_provider: provider.clone(),
            uploads: Arc::new(uploads),
        };

        Self {
            router: build_router(state.clone()),
            state,
            provider,
            extractor,
            upload_dir,
            _root: root,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, _, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn upload(&self, parts: &[Part<'_>]) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        let (status, _, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Files currently sitting in the upload directory.
    pub fn leftover_uploads(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.upload_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}

pub fn test_config(upload_dir: &Path, lexicon_dir: &Path, max_bytes: usize) -> ReaderConfig {
    ReaderConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        cors_allowed_origins: vec!["*".to_string()],
        upload: UploadConfig {
            dir: upload_dir.to_path_buf(),
            max_bytes,
        },
        extraction: ExtractionConfig {
            pdftotext_path: "pdftotext".to_string(),
            timeout_secs: 5,
        },
        lexicon: LexiconConfig {
            dir: lexicon_dir.to_path_buf(),
            download_url: "http://127.0.0.1:1/WordNet-3.0.tar.gz".to_string(),
            auto_download: false,
        },
        gemini: GeminiSettings {
            api_key: "test-api-key".to_string(),
            model: "mock".to_string(),
            timeout_secs: 5,
            base_url: None,
        },
    }
}

/// One multipart part: form name, optional filename, content.
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub data: &'a [u8],
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/pdf\r\n\r\n",
                    part.name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

const LICENSE_HEADER: &str = "  1 This software and database is being provided to you, the LICENSEE, by\n  2 Princeton University under the following license.\n";

/// Synsets of one part of speech: (lemma, gloss) in file order.
struct PosFixture {
    suffix: &'static str,
    pos_char: char,
    synsets: &'static [(&'static str, &'static str)],
    exceptions: &'static str,
}

const FIXTURE: &[PosFixture] = &[
    PosFixture {
        suffix: "noun",
        pos_char: 'n',
        synsets: &[
            ("dog", "a member of the genus Canis (probably descended from the common wolf) that has been domesticated by man since prehistoric times; occurs in many breeds; \"the dog barked all night\""),
            ("dog", "a dull unattractive unpleasant girl or woman; \"she got a reputation as a frump\"; \"she's a real dog\""),
            ("bark", "tough protective covering of the woody stems and roots of trees and other woody plants"),
            ("goose", "web-footed long-necked typically gregarious migratory aquatic birds usually larger and less aquatic than ducks"),
            ("ice_cream", "frozen dessert containing cream and sugar and flavoring"),
            ("calm", "a state of rest; \"the evening was calm; nothing moved\""),
        ],
        exceptions: "geese goose\n",
    },
    PosFixture {
        suffix: "verb",
        pos_char: 'v',
        synsets: &[
            ("bark", "speak in an unfriendly tone; \"She barked into the dog's face\""),
            ("run", "move fast by using one's feet, with one foot off the ground at any given time; \"Don't run--you'll be out of breath\""),
        ],
        exceptions: "ran run\n",
    },
    PosFixture {
        suffix: "adj",
        pos_char: 'a',
        synsets: &[(
            "quick",
            "accomplished rapidly and without delay; \"was quick to make friends\"",
        )],
        exceptions: "",
    },
    PosFixture {
        suffix: "adv",
        pos_char: 'r',
        synsets: &[("quickly", "with rapid movements; \"he works quickly\"")],
        exceptions: "",
    },
];

/// Write `index.*`, `data.*` and `*.exc` files with real byte offsets.
pub fn write_wordnet_fixture(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();

    for pos in FIXTURE {
        let mut data = String::from(LICENSE_HEADER);
        let mut offsets: Vec<(&str, Vec<usize>)> = Vec::new();

        for &(lemma, gloss) in pos.synsets {
            let offset = data.len();
            data.push_str(&format!(
                "{:08} 05 {} 01 {} 0 000 | {}  \n",
                offset, pos.pos_char, lemma, gloss
            ));
            match offsets.iter_mut().find(|(l, _)| *l == lemma) {
                Some((_, list)) => list.push(offset),
                None => offsets.push((lemma, vec![offset])),
            }
        }

        // The real index is sorted by lemma.
        offsets.sort_by(|a, b| a.0.cmp(&b.0));
        let mut index = String::from(LICENSE_HEADER);
        for (lemma, list) in &offsets {
            let synsets: Vec<String> = list.iter().map(|o| format!("{:08}", o)).collect();
            index.push_str(&format!(
                "{} {} {} 1 @ {} 0 {}  \n",
                lemma,
                pos.pos_char,
                list.len(),
                list.len(),
                synsets.join(" ")
            ));
        }

        std::fs::write(dir.join(format!("data.{}", pos.suffix)), data).unwrap();
        std::fs::write(dir.join(format!("index.{}", pos.suffix)), index).unwrap();
        std::fs::write(dir.join(format!("{}.exc", pos.suffix)), pos.exceptions).unwrap();
    }
}
