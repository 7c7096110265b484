//! Plate order service: order management plus the two generation paths.
//!
//! The download path holds the caller while the barcode wait runs; the
//! approve path spawns the wait onto a background task so the HTTP
//! response returns immediately.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};
use crate::external::automation::{ArtifactKind, ArtifactStore};
use crate::models::{NewPlateOrder, PlateOrder};
use crate::repositories::PlateOrderRepository;
use crate::services::plates::pdf::{render_box_pdf, render_label_pdf};
use crate::services::plates::poller::{PollOutcome, PollerConfig, wait_for_artifact};

/// A rendered PDF ready for download.
#[derive(Debug, Clone)]
pub struct GeneratedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct PlateService {
    orders: PlateOrderRepository,
    store: Arc<dyn ArtifactStore>,
    poller: PollerConfig,
    output_root: PathBuf,
    in_flight: Arc<DashMap<(i32, ArtifactKind), ()>>,
    shutdown: CancellationToken,
}

impl PlateService {
    pub fn new(
        orders: PlateOrderRepository,
        store: Arc<dyn ArtifactStore>,
        poller: PollerConfig,
        output_root: PathBuf,
    ) -> Self {
        Self {
            orders,
            store,
            poller,
            output_root,
            in_flight: Arc::new(DashMap::new()),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token cancelling all in-flight background waits; the server fires
    /// it during graceful shutdown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub async fn create_order(&self, order: NewPlateOrder) -> AppResult<PlateOrder> {
        self.orders.create(order).await
    }

    pub async fn get_order(&self, id: i32) -> AppResult<PlateOrder> {
        self.orders.get_by_id(id).await
    }

    pub async fn list_orders(&self, offset: i64, limit: i64) -> AppResult<Vec<PlateOrder>> {
        self.orders.list(offset, limit).await
    }

    /// Wait for the barcode artifact and return the rendered PDF.
    ///
    /// The caller chose to wait, so this holds their request for up to the
    /// polling bound. Timeout means no PDF: the error envelope is returned
    /// instead of a partial document.
    pub async fn generate_and_download(
        &self,
        order_id: i32,
        kind: ArtifactKind,
    ) -> AppResult<GeneratedPdf> {
        let order = self.orders.get_by_id(order_id).await?;

        let outcome =
            wait_for_artifact(self.store.as_ref(), order_id, kind, &self.poller, &self.shutdown)
                .await?;

        match outcome {
            PollOutcome::Ready { attempts } => {
                tracing::info!(order_id, artifact = %kind, attempts, "Barcode ready, generating PDF");
                Ok(Self::render(&order, kind)?)
            }
            PollOutcome::TimedOut => Err(AppError::UnprocessableContent {
                message: format!(
                    "Barcode artifacts for order {} were not produced within the polling bound",
                    order_id
                ),
            }),
            PollOutcome::Cancelled => Err(AppError::UnprocessableContent {
                message: "PDF generation was cancelled by shutdown".to_string(),
            }),
        }
    }

    /// Kick off the wait+generate sequence on a background task and return
    /// immediately; used by the approve flow so the response is not held
    /// open for up to the polling bound.
    ///
    /// Returns false when a generation for the same (order, artifact) pair
    /// is already running.
    pub async fn generate_in_background(
        &self,
        order_id: i32,
        kind: ArtifactKind,
    ) -> AppResult<bool> {
        // Validate the order before accepting the work.
        let order = self.orders.get_by_id(order_id).await?;

        if self.in_flight.insert((order_id, kind), ()).is_some() {
            tracing::debug!(order_id, artifact = %kind, "Generation already in flight");
            return Ok(false);
        }

        let store = Arc::clone(&self.store);
        let poller = self.poller;
        let cancel = self.shutdown.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let output_root = self.output_root.clone();

        tokio::spawn(async move {
            let outcome =
                match wait_for_artifact(store.as_ref(), order_id, kind, &poller, &cancel).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!(order_id, artifact = %kind, error = %e, "Barcode wait failed");
                        in_flight.remove(&(order_id, kind));
                        return;
                    }
                };

            if let PollOutcome::Ready { attempts } = outcome {
                match Self::render(&order, kind) {
                    Ok(pdf) => {
                        let dir = output_root.join(order_id.to_string());
                        let path = dir.join(&pdf.filename);
                        let write = async {
                            tokio::fs::create_dir_all(&dir).await?;
                            tokio::fs::write(&path, &pdf.bytes).await
                        };
                        match write.await {
                            Ok(()) => tracing::info!(
                                order_id,
                                artifact = %kind,
                                attempts,
                                path = %path.display(),
                                "Generated PDF saved"
                            ),
                            Err(e) => tracing::error!(
                                order_id,
                                artifact = %kind,
                                error = %e,
                                "Failed to save generated PDF"
                            ),
                        }
                    }
                    Err(e) => {
                        tracing::error!(order_id, artifact = %kind, error = %e, "PDF rendering failed")
                    }
                }
            }

            in_flight.remove(&(order_id, kind));
        });

        Ok(true)
    }

    fn render(order: &PlateOrder, kind: ArtifactKind) -> AppResult<GeneratedPdf> {
        let (filename, bytes) = match kind {
            ArtifactKind::BoxPdf => (
                format!("box_{}.pdf", order.id),
                render_box_pdf(order)?,
            ),
            ArtifactKind::Label => (
                format!("label_{}.pdf", order.id),
                render_label_pdf(order)?,
            ),
        };
        Ok(GeneratedPdf { filename, bytes })
    }
}
