use crate::config::EventFlags;
use crate::decisions::processor::DecisionProcessor;
use crate::domain::event::{Event, Properties};
use crate::schema::{SchemaRegistry, ValidationError};
use crate::sift::client::RiskClient;
use chrono::Utc;
use std::sync::Arc;

/// Final extension point over a property map before an event is queued.
/// Host collaborators can inject or rewrite fields here.
pub trait PropertyFilter: Send + Sync {
    fn apply(&self, event_type: &str, properties: &mut Properties);
}

/// Cycle-scoped event queue. One is constructed per processing cycle and
/// never shared across cycles; add and send are never concurrent.
pub struct EventQueue {
    registry: Arc<SchemaRegistry>,
    flags: EventFlags,
    filters: Vec<Arc<dyn PropertyFilter>>,
    entries: Vec<Event>,
}

impl EventQueue {
    pub fn new(registry: Arc<SchemaRegistry>, flags: EventFlags) -> Self {
        Self {
            registry,
            flags,
            filters: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn register_filter(&mut self, filter: Arc<dyn PropertyFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs filters, validates and appends in insertion order. A validation
    /// failure aborts only this event; it is logged with the offending field
    /// path and surfaced to the caller.
    pub fn add(&mut self, event_type: &str, mut properties: Properties) -> Result<(), ValidationError> {
        if !self.flags.is_enabled(event_type) {
            tracing::debug!(event_type, "event type disabled, not queueing");
            return Ok(());
        }

        for filter in &self.filters {
            filter.apply(event_type, &mut properties);
        }

        if let Err(err) = self.registry.validate(event_type, &properties) {
            tracing::warn!(event_type, field = %err.field, "event failed validation: {}", err.reason);
            return Err(err);
        }

        self.entries.push(Event {
            event_type: event_type.to_string(),
            properties,
            enqueued_at: Utc::now(),
        });
        Ok(())
    }

    /// Drains the queue: one sequential, best-effort remote call per entry
    /// in insertion order. A transport failure is logged and the loop moves
    /// on; the queue is cleared unconditionally so a bad cycle never blocks
    /// the next one. Afterwards decisions are fetched once per unique
    /// subject seen in the batch and handed to the processor.
    ///
    /// Returns `false` only for the configuration error of having no
    /// client, in which case nothing is sent and nothing is cleared.
    pub async fn send(
        &mut self,
        client: Option<&dyn RiskClient>,
        processor: &DecisionProcessor,
    ) -> bool {
        let Some(client) = client else {
            tracing::error!("risk client credentials missing, aborting dispatch cycle");
            return false;
        };
        if self.entries.is_empty() {
            return true;
        }

        let entries = std::mem::take(&mut self.entries);
        let mut subjects: Vec<String> = Vec::new();

        for entry in &entries {
            match client.track(&entry.event_type, entry.properties.clone()).await {
                Ok(ack) if ack.is_ok() => {
                    tracing::info!(event_type = %entry.event_type, "event delivered");
                }
                Ok(ack) => {
                    tracing::warn!(
                        event_type = %entry.event_type,
                        status = ack.status,
                        "risk service rejected event: {}",
                        ack.error_message.as_deref().unwrap_or("unknown error")
                    );
                }
                Err(err) => {
                    tracing::warn!(event_type = %entry.event_type, "event delivery failed: {err:#}");
                }
            }

            if let Some(subject) = entry.properties.get("$user_id").and_then(|v| v.as_str()) {
                if !subjects.iter().any(|s| s == subject) {
                    subjects.push(subject.to_string());
                }
            }
        }

        for subject in &subjects {
            match client.get_decisions(subject).await {
                Ok(decisions) => {
                    for decision in &decisions {
                        processor.apply_decision(decision).await;
                    }
                }
                Err(err) => {
                    tracing::warn!(subject_id = %subject, "decision lookup failed: {err:#}");
                }
            }
        }

        true
    }
}
