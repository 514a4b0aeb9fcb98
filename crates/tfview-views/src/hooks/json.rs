use super::timer::Timers;
use super::{Hook, complete_message, errored_message, start_message};
use crate::format::format_elapsed;
use crate::json::{HookRecord, JsonView, MessageType};
use tfview_types::{ActionKind, HookAction, HookEvent, Phase};

/// Emits one JSON record per progress event. Does no counting; consumers
/// derive totals from the stream.
pub struct JsonHook {
    view: JsonView,
    timers: Timers,
}

impl JsonHook {
    pub fn new(view: JsonView) -> Self {
        Self {
            view,
            timers: Timers::default(),
        }
    }

    fn record(&self, event: &HookEvent) -> (MessageType, String, HookRecord) {
        let mut record = HookRecord::new(&event.addr);
        if let Some(id) = &event.id {
            record.id_key = Some(id.key.clone());
            record.id_value = Some(id.value.clone());
        }

        if event.action == ActionKind::Refresh {
            let (kind, message) = match event.phase {
                Phase::Start => (MessageType::RefreshStart, start_message(event)),
                Phase::Complete => (MessageType::RefreshComplete, complete_message(event, "")),
                Phase::Errored => (MessageType::RefreshErrored, errored_message(event, "")),
            };
            return (kind, message, record);
        }

        record.action = Some(event.action);
        match event.phase {
            Phase::Start => {
                self.timers.start(&event.addr);
                (MessageType::ApplyStart, start_message(event), record)
            }
            Phase::Complete | Phase::Errored => {
                let elapsed = self.timers.finish(&event.addr);
                record.elapsed_seconds = Some(elapsed.as_secs());
                let elapsed = format_elapsed(elapsed);
                if event.phase == Phase::Complete {
                    (MessageType::ApplyComplete, complete_message(event, &elapsed), record)
                } else {
                    (MessageType::ApplyErrored, errored_message(event, &elapsed), record)
                }
            }
        }
    }
}

impl Hook for JsonHook {
    fn name(&self) -> &str {
        "JsonHook"
    }

    fn on_event(&self, event: &HookEvent) -> HookAction {
        let (kind, message, record) = self.record(event);
        self.view.hook(kind, &message, &record);
        HookAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorize::Colorize;
    use crate::streams::Streams;
    use crate::view::View;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tfview_types::ResourceAddr;

    #[test]
    fn test_refresh_events_become_records() {
        let (streams, captured) = Streams::capture();
        let view = Arc::new(View::new(streams, Colorize::disabled(), false));
        let hook = JsonHook::new(JsonView::new(view));
        let addr: ResourceAddr = r#"module.app.aws_instance.web["a"]"#.parse().unwrap();

        let start = HookEvent::new(addr.clone(), ActionKind::Refresh, Phase::Start);
        let done = HookEvent::new(addr, ActionKind::Refresh, Phase::Complete);
        hook.on_event(&start.with_id("id", "i-1"));
        hook.on_event(&done.with_id("id", "i-1"));

        let records: Vec<Value> = captured
            .stdout_lines()
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "refresh_start");
        assert_eq!(
            records[0]["@message"],
            r#"module.app.aws_instance.web["a"]: Refreshing state... [id=i-1]"#
        );
        assert_eq!(
            records[0]["hook"]["resource"],
            json!({
                "addr": r#"module.app.aws_instance.web["a"]"#,
                "module": "module.app",
                "resource": r#"aws_instance.web["a"]"#,
                "implied_provider": "aws",
                "resource_type": "aws_instance",
                "resource_name": "web",
                "resource_key": "a"
            })
        );
        assert_eq!(records[1]["type"], "refresh_complete");
        assert_eq!(records[1]["hook"]["id_value"], "i-1");
        assert!(records[1]["hook"].get("action").is_none());
    }

    #[test]
    fn test_apply_errored_carries_action_and_elapsed() {
        let (streams, captured) = Streams::capture();
        let view = Arc::new(View::new(streams, Colorize::disabled(), false));
        let hook = JsonHook::new(JsonView::new(view));
        let addr = ResourceAddr::managed("aws_s3_bucket", "logs");

        hook.on_event(&HookEvent::new(addr, ActionKind::Delete, Phase::Errored));

        let record: Value = serde_json::from_str(&captured.stdout_lines()[0]).unwrap();
        assert_eq!(record["type"], "apply_errored");
        assert_eq!(record["hook"]["action"], "delete");
        assert_eq!(record["hook"]["elapsed_seconds"], 0);
        assert_eq!(record["@message"], "aws_s3_bucket.logs: Destruction errored after 0s");
    }
}
