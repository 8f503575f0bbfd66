//! Registry handle bundling the Yunhu builder/exporter pair.

use std::any::Any;

use unimsg_core::{SupportAdapter, registry::Adapter};

use crate::{builder::YunhuMessageBuilder, exporter::YunhuMessageExporter};

/// The Yunhu binding as one registrable unit. Register it in an
/// [`AdapterRegistry`](unimsg_core::AdapterRegistry) at startup and fetch
/// it back typed with `get_as::<YunhuAdapter>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YunhuAdapter {
    pub builder: YunhuMessageBuilder,
    pub exporter: YunhuMessageExporter,
}

impl YunhuAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adapter for YunhuAdapter {
    fn adapter(&self) -> SupportAdapter {
        SupportAdapter::Yunhu
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use unimsg_core::{AdapterRegistry, MessageBuilder, MessageExporter};

    use super::*;

    #[test]
    fn registry_dispatches_by_adapter_tag() {
        let mut registry = AdapterRegistry::new();
        registry.register(Box::new(YunhuAdapter::new()));

        let adapter = registry
            .get_as::<YunhuAdapter>(SupportAdapter::Yunhu)
            .expect("yunhu adapter registered");
        assert_eq!(adapter.builder.adapter(), SupportAdapter::Yunhu);
        assert_eq!(adapter.exporter.adapter(), SupportAdapter::Yunhu);
    }
}
