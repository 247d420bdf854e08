/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Bounded-concurrency batch processing, used by the poller engine to
//! fan out event processing without overwhelming the TE API.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub struct BatchConfig {
  /// Maximum number of events processed concurrently.
  pub batch_size: usize,
  /// Whether to continue processing remaining items after one fails.
  pub continue_on_error: bool,
}

impl Default for BatchConfig {
  fn default() -> Self {
    Self { batch_size: te_core::DEFAULT_BATCH_SIZE, continue_on_error: true }
  }
}

#[derive(Debug, Clone)]
pub struct BatchResult<T> {
  pub success: Vec<T>,
  pub failures: Vec<(usize, EngineError)>,
  pub total_processed: usize,
}

impl<T> Default for BatchResult<T> {
  fn default() -> Self {
    Self { success: Vec::new(), failures: Vec::new(), total_processed: 0 }
  }
}

impl<T> BatchResult<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn success_count(&self) -> usize {
    self.success.len()
  }

  pub fn failure_count(&self) -> usize {
    self.failures.len()
  }
}

/// Runs a fallible async operation over a set of items with at most
/// `config.batch_size` running concurrently, using a semaphore the same way
/// the TE poller bounds its fan-out to the TE API.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
  config: BatchConfig,
  semaphore: Arc<Semaphore>,
}

impl BatchProcessor {
  pub fn new(config: BatchConfig) -> Self {
    let semaphore = Arc::new(Semaphore::new(config.batch_size.max(1)));
    Self { config, semaphore }
  }

  pub async fn process<T, F, O>(&self, items: Vec<T>, processor: F) -> EngineResult<BatchResult<O>>
  where
    T: Send + 'static,
    F: Fn(T) -> futures::future::BoxFuture<'static, EngineResult<O>> + Send + Sync + Clone + 'static,
    O: Send + 'static,
  {
    let mut result = BatchResult::new();
    result.total_processed = items.len();

    debug!("processing {} items with concurrency {}", items.len(), self.config.batch_size);

    let semaphore = self.semaphore.clone();
    let outcomes: Vec<Result<O, EngineError>> = stream::iter(items.into_iter().enumerate())
      .map(move |(idx, item)| {
        let processor = processor.clone();
        let semaphore = semaphore.clone();
        async move {
          let _permit =
            semaphore.acquire().await.expect("semaphore should not be closed during operation");
          (idx, processor(item).await)
        }
      })
      .buffer_unordered(self.config.batch_size.max(1))
      .map(|(idx, outcome)| {
        if let Err(ref e) = outcome {
          warn!(item_index = idx, error = %e, "batch item failed");
        }
        outcome
      })
      .collect()
      .await;

    for outcome in outcomes {
      match outcome {
        Ok(value) => result.success.push(value),
        Err(e) => {
          if !self.config.continue_on_error {
            return Err(e);
          }
          result.failures.push((result.failures.len(), e));
        }
      }
    }

    debug!(successes = result.success_count(), failures = result.failure_count(), "batch complete");

    Ok(result)
  }
}
