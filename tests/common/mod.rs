#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use routedoc::error::ContentSourceErrorKind;
use routedoc::{
    CompletionRequest, Config, ContentSource, DocError, DocumentationPipeline, RepoEntry,
    RepositoryId, Result, TextGenerator,
};

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
        info!("Test environment initialized");
    });
}

pub fn repo() -> RepositoryId {
    RepositoryId::new("acme", "shop")
}

/// In-memory repository, listed in path order.
#[derive(Default)]
pub struct MockSource {
    files: BTreeMap<String, String>,
    listing_error: Option<ContentSourceErrorKind>,
    unreadable: Vec<String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    pub fn failing_listing(mut self, kind: ContentSourceErrorKind) -> Self {
        self.listing_error = Some(kind);
        self
    }

    /// Listed but fails on read.
    pub fn unreadable(mut self, path: &str) -> Self {
        self.files.insert(path.to_string(), String::new());
        self.unreadable.push(path.to_string());
        self
    }
}

#[async_trait]
impl ContentSource for MockSource {
    async fn list_files(&self, repo: &RepositoryId) -> Result<Vec<RepoEntry>> {
        match self.listing_error {
            Some(ContentSourceErrorKind::NotFound) => {
                Err(DocError::not_found(format!("repository {}", repo)))
            }
            Some(ContentSourceErrorKind::RateLimited) => {
                Err(DocError::rate_limited("API rate limit exceeded"))
            }
            Some(ContentSourceErrorKind::Other) => Err(DocError::content_source("unreachable")),
            None => Ok(self.files.keys().map(RepoEntry::file).collect()),
        }
    }

    async fn read_file(&self, _repo: &RepositoryId, path: &str) -> Result<String> {
        if self.unreadable.iter().any(|p| p == path) {
            return Err(DocError::not_found(path));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| DocError::not_found(path))
    }
}

/// Answers title prompts with `title` and analysis prompts with `prose`.
/// Prompts containing `fail_marker` fail with a service error; prompts
/// containing `slow_marker` are answered after a short delay.
pub struct MockGenerator {
    pub title: String,
    pub prose: String,
    pub fail_marker: Option<String>,
    pub slow_marker: Option<String>,
    calls: AtomicUsize,
}

impl MockGenerator {
    pub fn new(title: &str, prose: &str) -> Self {
        Self {
            title: title.to_string(),
            prose: prose.to_string(),
            fail_marker: None,
            slow_marker: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_marker = Some(marker.to_string());
        self
    }

    pub fn slow_on(mut self, marker: &str) -> Self {
        self.slow_marker = Some(marker.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!("mock completion, max_tokens={}", request.max_tokens);

        if let Some(marker) = &self.slow_marker {
            if request.prompt.contains(marker.as_str()) {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
        if let Some(marker) = &self.fail_marker {
            if request.prompt.contains(marker.as_str()) {
                return Err(DocError::service(
                    "OpenAI quota exceeded or rate limited (HTTP 429)",
                ));
            }
        }

        if request.max_tokens <= Config::default().title.max_tokens {
            Ok(self.title.clone())
        } else {
            Ok(self.prose.clone())
        }
    }
}

pub fn pipeline(source: MockSource, generator: Arc<dyn TextGenerator>) -> DocumentationPipeline {
    setup_test_env();
    DocumentationPipeline::new(Arc::new(source), generator, Config::default())
}

pub const FULL_PROSE: &str = "**OVERVIEW:** Returns the orders of the current account.

**TECHNICAL DETAILS:** A GET handler backed by the orders table.

**PARAMETERS:** None.

**RESPONSE FORMAT:** A JSON array of orders.

**ERROR HANDLING:** Responds with 500 when the query fails.";

pub const PLACEHOLDERS: [&str; 5] = [
    "Documentation generation in progress.",
    "Technical details are being processed.",
    "Parameter documentation is being generated.",
    "Response format documentation is being prepared.",
    "Error handling documentation is being created.",
];

pub const NEXT_ROUTE: &str = r#"
import { NextResponse } from 'next/server';
import { authenticate } from '@/lib/auth';

export const GET = async (req) => {
  const user = await authenticate(req);
  try {
    const rows = await query('select * from orders where owner = $1', [user.id]);
    return NextResponse.json(rows.map(toDto));
  } catch (error) {
    return NextResponse.json({ error: error.message }, { status: 500 });
  }
};
"#;

pub const EXPRESS_ROUTER: &str = r#"
const express = require('express');
const router = express.Router();

router.get('/orders', async (req, res) => {
  const orders = await Order.find();
  res.json(orders);
});

router.post('/orders/new', validate(orderSchema), async (req, res) => {
  const order = await Order.create(req.body);
  res.status(201).json(order);
});

module.exports = router;
"#;

pub const HELPERS: &str = r#"
export function formatPrice(cents, currency) {
  return `${(cents / 100).toFixed(2)} ${currency}`;
}
"#;

pub const UNBALANCED: &str = r#"
export const GET = async () => {
  return fetch(url;
};
"#;
