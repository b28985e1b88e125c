use std::any::{Any, TypeId};
use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// Application-wide event bus
///
/// Handlers are keyed by the concrete event type and invoked synchronously
/// on the publishing thread. The registry is not locked while handlers run,
/// so a handler may publish further events on the same bus.
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<TypeId, Vec<SharedHandler>>>>,
}

type SharedHandler = Arc<Mutex<Box<dyn EventHandler>>>;

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Events published by the builder screens
pub mod events {
    use super::Event;

    /// A canvas mutation was committed, undone or redone
    #[derive(Debug, Clone)]
    pub struct CanvasChanged {
        pub history_index: usize,
        pub history_len: usize,
        pub item_count: usize,
    }

    /// The report builder produced a dashboard
    #[derive(Debug, Clone)]
    pub struct DashboardSaved {
        pub dashboard_id: String,
        pub name: String,
    }

    /// A file was accepted by the import form
    #[derive(Debug, Clone)]
    pub struct DatasetImported {
        pub title: String,
        pub file_type: String,
        pub file_name: String,
    }

    /// A save or export form was confirmed
    #[derive(Debug, Clone)]
    pub struct ExportRequested {
        pub context: String,
        pub name: String,
        pub format: Option<String>,
    }

    /// The session moved to another screen
    #[derive(Debug, Clone)]
    pub struct ScreenChanged {
        pub from: String,
        pub to: String,
    }

    /// Progress tick from the processing runner
    #[derive(Debug, Clone)]
    pub struct ProcessingProgress {
        pub operation: String,
        pub progress: u8,
    }

    /// All selected operations produced a result
    #[derive(Debug, Clone)]
    pub struct ProcessingFinished {
        pub operations: usize,
        pub rows_affected: usize,
    }

    /// The runner stopped before finishing
    #[derive(Debug, Clone)]
    pub struct ProcessingCancelled {
        pub completed: usize,
        pub total: usize,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        CanvasChanged,
        DashboardSaved,
        DatasetImported,
        ExportRequested,
        ScreenChanged,
        ProcessingProgress,
        ProcessingFinished,
        ProcessingCancelled
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers
            .entry(type_id)
            .or_default()
            .push(Arc::new(Mutex::new(handler)));
    }

    /// Subscribe a closure that receives the concrete event type
    pub fn subscribe_fn<E, F>(&self, mut f: F)
    where
        E: Event,
        F: FnMut(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E>(handler_from_fn(move |event: &dyn Event| {
            if let Some(event) = event.as_any().downcast_ref::<E>() {
                f(event);
            }
        }));
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = TypeId::of::<E>();
        let event_handlers = self
            .handlers
            .lock()
            .get(&type_id)
            .cloned()
            .unwrap_or_default();

        for handler in event_handlers {
            handler.lock().handle(&event);
        }
    }

    /// Number of handlers registered for `E`
    pub fn handler_count<E: Event>(&self) -> usize {
        self.handlers
            .lock()
            .get(&TypeId::of::<E>())
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapter turning a closure into an [`EventHandler`]
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::{CanvasChanged, DashboardSaved, ProcessingProgress, ScreenChanged};
    use super::*;

    #[test]
    fn test_typed_subscription_only_sees_its_type() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe_fn(move |event: &ProcessingProgress| {
            sink.lock().push(event.progress);
        });

        bus.publish(ProcessingProgress {
            operation: "Trim Whitespace".to_string(),
            progress: 40,
        });
        bus.publish(CanvasChanged {
            history_index: 1,
            history_len: 2,
            item_count: 4,
        });

        assert_eq!(*seen.lock(), vec![40]);
        assert_eq!(bus.handler_count::<ProcessingProgress>(), 1);
        assert_eq!(bus.handler_count::<CanvasChanged>(), 0);
    }

    #[test]
    fn test_handler_can_publish_nested_event() {
        let bus = Arc::new(EventBus::new());
        let screens = Arc::new(Mutex::new(Vec::new()));

        let sink = screens.clone();
        bus.subscribe_fn(move |event: &ScreenChanged| {
            sink.lock().push(event.to.clone());
        });

        let weak = Arc::downgrade(&bus);
        bus.subscribe_fn(move |_: &DashboardSaved| {
            if let Some(bus) = weak.upgrade() {
                bus.publish(ScreenChanged {
                    from: "Report Builder".to_string(),
                    to: "Dashboard Builder".to_string(),
                });
            }
        });

        bus.publish(DashboardSaved {
            dashboard_id: "dash-1".to_string(),
            name: "Revenue".to_string(),
        });

        assert_eq!(*screens.lock(), vec!["Dashboard Builder".to_string()]);
    }
}
