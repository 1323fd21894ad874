use anyhow::{bail, Context};
use std::collections::HashSet;
use std::sync::Arc;

use invsys_db::TableSchema;

use crate::module::{InitCtx, Module};

/// Module registry: keeps registration order and drives the module lifecycle
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module; names must be unique
    pub fn register(&mut self, module: Arc<dyn Module>) -> anyhow::Result<()> {
        if self.get_module(module.name()).is_some() {
            bail!("module '{}' is already registered", module.name());
        }
        self.modules.push(module);
        Ok(())
    }

    /// All registered modules, in registration order
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Get a module by name
    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.iter().find(|module| module.name() == name)
    }

    /// Initialize modules in registration order
    pub async fn init_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("initializing {} modules", self.modules.len());

        for module in &self.modules {
            tracing::debug!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Start modules in registration order
    pub async fn start_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("starting {} modules", self.modules.len());

        for module in &self.modules {
            tracing::debug!(module = module.name(), "starting module");

            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop modules in reverse registration order
    pub async fn stop_modules(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} modules", self.modules.len());

        for module in self.modules.iter().rev() {
            tracing::debug!(module = module.name(), "stopping module");

            module
                .stop()
                .await
                .with_context(|| format!("failed to stop module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Collect every module's tables in registration order
    ///
    /// Fails if two modules claim the same table.
    pub fn collect_tables(&self) -> anyhow::Result<Vec<TableSchema>> {
        let mut seen = HashSet::new();
        let mut tables = Vec::new();

        for module in &self.modules {
            for table in module.tables() {
                if !seen.insert(table.name) {
                    bail!(
                        "table '{}' claimed twice (second claim by module '{}')",
                        table.name,
                        module.name()
                    );
                }
                tables.push(table);
            }
        }

        Ok(tables)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use invsys_db::{schema, MemoryDatabase};
    use std::sync::Mutex;

    struct TestModule {
        name: &'static str,
        tables: Vec<TableSchema>,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl TestModule {
        fn new(name: &'static str, events: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                name,
                tables: vec![],
                events: Arc::clone(events),
            })
        }

        fn record(&self, event: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}:{}", event, self.name));
        }
    }

    #[async_trait::async_trait]
    impl Module for TestModule {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.record("init");
            Ok(())
        }

        fn tables(&self) -> Vec<TableSchema> {
            self.tables.clone()
        }

        async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.record("start");
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            self.record("stop");
            Ok(())
        }
    }

    #[test]
    fn test_module_registry_creation() {
        let registry = ModuleRegistry::new();
        assert!(registry.modules().is_empty());
        assert!(registry.collect_tables().unwrap().is_empty());
    }

    #[test]
    fn duplicate_module_names_are_rejected() {
        let events = Arc::default();
        let mut registry = ModuleRegistry::new();

        registry.register(TestModule::new("item", &events)).unwrap();
        assert!(registry.register(TestModule::new("item", &events)).is_err());
        assert_eq!(registry.modules().len(), 1);
    }

    #[test]
    fn tables_keep_registration_order_and_reject_duplicates() {
        let events = Arc::default();
        let mut registry = ModuleRegistry::new();
        registry
            .register(Arc::new(TestModule {
                name: "user",
                tables: vec![schema::USERS],
                events: Arc::clone(&events),
            }))
            .unwrap();
        registry
            .register(Arc::new(TestModule {
                name: "auth",
                tables: vec![schema::ROLES],
                events: Arc::clone(&events),
            }))
            .unwrap();

        let names: Vec<_> = registry
            .collect_tables()
            .unwrap()
            .iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["users", "roles"]);

        registry
            .register(Arc::new(TestModule {
                name: "profile",
                tables: vec![schema::USERS],
                events,
            }))
            .unwrap();
        assert!(registry.collect_tables().is_err());
    }

    #[tokio::test]
    async fn test_module_lifecycle() {
        let events: Arc<Mutex<Vec<String>>> = Arc::default();
        let mut registry = ModuleRegistry::new();
        let settings = Settings::default();
        let db = MemoryDatabase::new();
        let ctx = InitCtx {
            settings: &settings,
            db: &db,
        };

        registry.register(TestModule::new("a", &events)).unwrap();
        registry.register(TestModule::new("b", &events)).unwrap();

        registry.init_modules(&ctx).await.unwrap();
        registry.start_modules(&ctx).await.unwrap();
        registry.stop_modules().await.unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["init:a", "init:b", "start:a", "start:b", "stop:b", "stop:a"]
        );
    }
}
