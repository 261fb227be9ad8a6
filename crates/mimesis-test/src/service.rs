//! ToolTestService: drive one plugin's lifecycle and capture its output.

use std::collections::BTreeMap;
use std::sync::Arc;

use mimesis_plugin_sdk::{
    Anchor, AnchorSchemas, Plugin, PluginError, Provider, RecordBatch, SchemaRef,
};
use mimesis_telemetry::{events, log_hook_failed, log_lifecycle};

use crate::capture::{Capture, CaptureSnapshot, CapturingIo, CapturingWriter};

/// Configuration used when a test does not supply one.
pub const DEFAULT_CONFIG: &str = "<Configuration/>";

/// Plugin test harness.
///
/// Constructs the plugin with a [`Provider`] whose I/O sink and output
/// writer record into memory, then replays lifecycle hooks against it.
/// Every hook is a plain pass-through: plugin errors come back unchanged,
/// and whatever was captured before the error stays visible.
pub struct ToolTestService<P: Plugin> {
    /// The plugin under test.
    plugin: P,
    /// Shared with the capturing capabilities inside the plugin's provider.
    capture: Arc<Capture>,
}

impl<P: Plugin> ToolTestService<P> {
    /// Build the plugin with the given configuration and anchors.
    ///
    /// The configuration is passed through verbatim. A construction error
    /// raised by the plugin is returned as is. Anything the plugin logs or
    /// writes from its constructor is not captured.
    pub fn new(
        config: impl Into<String>,
        input_anchors: AnchorSchemas,
        output_anchors: AnchorSchemas,
    ) -> Result<Self, PluginError> {
        let capture = Capture::disarmed();
        let provider = Provider::new(P::NAME, config, input_anchors, output_anchors)
            .with_io(Arc::new(CapturingIo::new(capture.clone())))
            .with_writer(Arc::new(CapturingWriter::new(capture.clone())));

        let plugin = P::new(provider).inspect_err(|e| {
            log_hook_failed!(plugin = P::NAME, hook = "new", error = %e);
        })?;
        capture.arm();
        log_lifecycle!(events::PLUGIN_CONSTRUCTED, plugin = P::NAME);

        Ok(Self { plugin, capture })
    }

    /// Deliver `batch` to the plugin as if it arrived on `anchor`.
    pub fn run_on_record_batch(
        &mut self,
        batch: &RecordBatch,
        anchor: &Anchor,
    ) -> Result<(), PluginError> {
        log_lifecycle!(
            events::RECORD_BATCH,
            plugin = P::NAME,
            anchor = %anchor,
            rows = batch.num_rows()
        );
        self.plugin
            .on_record_batch(batch, anchor)
            .inspect_err(|e| log_hook_failed!(plugin = P::NAME, hook = "on_record_batch", error = %e))
    }

    /// Tell the plugin that `anchor` has delivered all its batches.
    pub fn run_on_incoming_connection_complete(
        &mut self,
        anchor: &Anchor,
    ) -> Result<(), PluginError> {
        log_lifecycle!(events::CONNECTION_COMPLETE, plugin = P::NAME, anchor = %anchor);
        self.plugin
            .on_incoming_connection_complete(anchor)
            .inspect_err(|e| {
                log_hook_failed!(
                    plugin = P::NAME,
                    hook = "on_incoming_connection_complete",
                    error = %e
                )
            })
    }

    /// Tell the plugin no more input will arrive.
    pub fn run_on_complete(&mut self) -> Result<(), PluginError> {
        log_lifecycle!(events::PLUGIN_COMPLETE, plugin = P::NAME);
        self.plugin
            .on_complete()
            .inspect_err(|e| log_hook_failed!(plugin = P::NAME, hook = "on_complete", error = %e))
    }

    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    pub fn plugin_mut(&mut self) -> &mut P {
        &mut self.plugin
    }

    /// Batches written so far, keyed by output anchor name.
    ///
    /// Anchors the plugin never wrote to are absent.
    pub fn data_streams(&self) -> BTreeMap<String, Vec<RecordBatch>> {
        self.capture.data_streams()
    }

    /// Log lines emitted so far, each formatted `LEVEL:message`.
    pub fn io_stream(&self) -> Vec<String> {
        self.capture.io_stream()
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        self.capture.snapshot()
    }
}

/// Builder for [`ToolTestService`].
#[derive(Debug, Clone)]
pub struct ToolTestServiceBuilder {
    config: String,
    input_anchors: AnchorSchemas,
    output_anchors: AnchorSchemas,
}

impl Default for ToolTestServiceBuilder {
    fn default() -> Self {
        Self {
            config: DEFAULT_CONFIG.to_string(),
            input_anchors: AnchorSchemas::new(),
            output_anchors: AnchorSchemas::new(),
        }
    }
}

impl ToolTestServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw configuration string.
    pub fn config(mut self, config: impl Into<String>) -> Self {
        self.config = config.into();
        self
    }

    /// Declare an input anchor.
    pub fn input_anchor(mut self, name: impl Into<String>, schema: SchemaRef) -> Self {
        self.input_anchors.insert(name.into(), schema);
        self
    }

    /// Declare an output anchor.
    pub fn output_anchor(mut self, name: impl Into<String>, schema: SchemaRef) -> Self {
        self.output_anchors.insert(name.into(), schema);
        self
    }

    pub fn build<P: Plugin>(self) -> Result<ToolTestService<P>, PluginError> {
        ToolTestService::new(self.config, self.input_anchors, self.output_anchors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{empty_schema, repeated_batch, test_schema};

    /// Echoes batches to `Output` and narrates every hook. Fails on demand.
    struct Echo {
        provider: Provider,
        batches_seen: usize,
    }

    impl Plugin for Echo {
        const NAME: &'static str = "Echo";

        fn new(provider: Provider) -> Result<Self, PluginError> {
            if provider.config().contains("reject") {
                return Err(PluginError::Config("rejected".to_string()));
            }
            Ok(Self {
                provider,
                batches_seen: 0,
            })
        }

        fn on_record_batch(
            &mut self,
            batch: &RecordBatch,
            anchor: &Anchor,
        ) -> Result<(), PluginError> {
            self.batches_seen += 1;
            self.provider.write_to_anchor("Output", batch.clone())?;
            if anchor.connection == "bad" {
                self.provider.error("bad connection");
                return Err(PluginError::Failed(format!("cannot read {}", anchor)));
            }
            Ok(())
        }

        fn on_incoming_connection_complete(&mut self, anchor: &Anchor) -> Result<(), PluginError> {
            self.provider.warn(&format!("closed {}", anchor));
            Ok(())
        }

        fn on_complete(&mut self) -> Result<(), PluginError> {
            self.provider.info("done");
            self.provider.write_to_anchor("Missing", repeated_batch(1))
        }
    }

    fn service() -> ToolTestService<Echo> {
        ToolTestServiceBuilder::new()
            .input_anchor("Input", test_schema())
            .output_anchor("Output", empty_schema())
            .build()
            .unwrap()
    }

    #[test]
    fn construction_captures_nothing() {
        let service = service();
        assert!(service.data_streams().is_empty());
        assert!(service.io_stream().is_empty());
        assert_eq!(service.plugin().batches_seen, 0);
    }

    /// Logs and writes from its constructor.
    struct Chatty {
        provider: Provider,
    }

    impl Plugin for Chatty {
        const NAME: &'static str = "Chatty";

        fn new(provider: Provider) -> Result<Self, PluginError> {
            provider.info("Chatty tool started");
            provider.write_to_anchor("Output", repeated_batch(1))?;
            Ok(Self { provider })
        }

        fn on_record_batch(&mut self, batch: &RecordBatch, _: &Anchor) -> Result<(), PluginError> {
            self.provider.write_to_anchor("Output", batch.clone())
        }

        fn on_incoming_connection_complete(&mut self, _: &Anchor) -> Result<(), PluginError> {
            Ok(())
        }

        fn on_complete(&mut self) -> Result<(), PluginError> {
            self.provider.info("Chatty tool done.");
            Ok(())
        }
    }

    #[test]
    fn constructor_output_is_not_captured() {
        let mut service: ToolTestService<Chatty> = ToolTestServiceBuilder::new()
            .output_anchor("Output", empty_schema())
            .build()
            .unwrap();
        assert!(service.io_stream().is_empty());
        assert!(service.data_streams().is_empty());

        service
            .run_on_record_batch(&repeated_batch(2), &Anchor::new("Input", "1"))
            .unwrap();
        service.run_on_complete().unwrap();
        assert_eq!(service.io_stream(), vec!["INFO:Chatty tool done."]);
        assert_eq!(service.data_streams()["Output"], vec![repeated_batch(2)]);
    }

    #[test]
    fn configuration_reaches_plugin_verbatim() {
        let config = "<Configuration><Seed>7</Seed></Configuration>";
        let service: ToolTestService<Echo> =
            ToolTestService::new(config, AnchorSchemas::new(), AnchorSchemas::new()).unwrap();
        assert_eq!(service.plugin().provider.config(), config);
        assert_eq!(service.plugin().provider.plugin_name(), "Echo");
    }

    #[test]
    fn builder_defaults_to_empty_configuration() {
        assert_eq!(service().plugin().provider.config(), DEFAULT_CONFIG);
    }

    #[test]
    fn construction_error_propagates() {
        let result = ToolTestServiceBuilder::new()
            .config("<Configuration reject='yes'/>")
            .build::<Echo>();
        assert!(matches!(result, Err(PluginError::Config(ref m)) if m == "rejected"));
    }

    #[test]
    fn record_batch_is_captured_unchanged() {
        let mut service = service();
        let batch = repeated_batch(4);
        service
            .run_on_record_batch(&batch, &Anchor::new("Input", "1"))
            .unwrap();
        assert_eq!(service.data_streams()["Output"], vec![batch]);
        assert!(service.io_stream().is_empty());
    }

    #[test]
    fn batches_accumulate_in_write_order() {
        let mut service = service();
        let anchor = Anchor::new("Input", "1");
        for repeat in 1..=3 {
            service
                .run_on_record_batch(&repeated_batch(repeat), &anchor)
                .unwrap();
        }
        let rows: Vec<usize> = service.data_streams()["Output"]
            .iter()
            .map(RecordBatch::num_rows)
            .collect();
        assert_eq!(rows, vec![3, 6, 9]);
        assert_eq!(service.plugin().batches_seen, 3);
    }

    #[test]
    fn hook_error_propagates_and_keeps_capture() {
        let mut service = service();
        let err = service
            .run_on_record_batch(&repeated_batch(1), &Anchor::new("Input", "bad"))
            .unwrap_err();
        assert!(matches!(err, PluginError::Failed(ref m) if m == "cannot read Input:bad"));
        assert_eq!(service.data_streams()["Output"].len(), 1);
        assert_eq!(service.io_stream(), vec!["ERROR:bad connection"]);
    }

    #[test]
    fn undeclared_anchor_error_surfaces_from_run() {
        let mut service = service();
        let err = service.run_on_complete().unwrap_err();
        assert!(matches!(err, PluginError::UnknownOutputAnchor(ref a) if a == "Missing"));
        assert_eq!(service.io_stream(), vec!["INFO:done"]);
        assert!(service.data_streams().is_empty());
    }

    #[test]
    fn io_lines_follow_call_order() {
        let mut service = service();
        service
            .run_on_incoming_connection_complete(&Anchor::new("Input", "2"))
            .unwrap();
        let _ = service.run_on_complete();
        service
            .run_on_incoming_connection_complete(&Anchor::new("Input", "1"))
            .unwrap();
        assert_eq!(
            service.io_stream(),
            vec!["WARN:closed Input:2", "INFO:done", "WARN:closed Input:1"]
        );
    }

    #[test]
    fn inspection_is_idempotent() {
        let mut service = service();
        service
            .run_on_record_batch(&repeated_batch(1), &Anchor::new("Input", "1"))
            .unwrap();
        let first = (service.data_streams(), service.io_stream());
        let second = (service.data_streams(), service.io_stream());
        assert_eq!(first, second);
        assert_eq!(service.snapshot(), service.snapshot());
    }

    #[test]
    fn plugin_mut_allows_state_inspection() {
        let mut service = service();
        service.plugin_mut().batches_seen = 10;
        service
            .run_on_record_batch(&repeated_batch(1), &Anchor::new("Input", "1"))
            .unwrap();
        assert_eq!(service.plugin().batches_seen, 11);
    }
}
