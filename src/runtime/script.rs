/// The fixed interpreter embedded in every bundle. It reads the runtime
/// manifest from the overlay root and drives the same state machine as
/// [`crate::runtime::machine::Machine`].
pub const RUNTIME_SCRIPT: &str = include_str!("../../templates/overlay/runtime.js");

#[cfg(test)]
mod tests {
    use super::RUNTIME_SCRIPT;
    use crate::compile::behavior::RuntimeManifest;
    use crate::compile::compile;
    use crate::runtime::host::{HostCall, RecordingHost};
    use crate::runtime::machine::Machine;
    use crate::settings::GeneratorSettings;
    use crate::survey::types::{Question, SurveyDefinition};
    use boa_engine::{Context, Source};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    const HOST_STUB: &str = include_str!("testdata/host_stub.js");

    /// runtime.js loaded into a JS engine against a stub DOM and host player.
    struct ScriptRun {
        ctx: Context,
    }

    impl ScriptRun {
        fn mount(manifest: &RuntimeManifest, attached: bool) -> Self {
            let mut run = Self {
                ctx: Context::default(),
            };
            run.eval(HOST_STUB);
            let manifest_json = serde_json::to_string(manifest).expect("manifest json");
            run.eval(&format!("manifestJson = {};", js_string(&manifest_json)));
            run.eval(RUNTIME_SCRIPT);
            run.eval(&format!("mount({attached});"));
            run
        }

        fn eval(&mut self, src: &str) -> String {
            let value = self
                .ctx
                .eval(Source::from_bytes(src))
                .expect("script evaluates");
            value
                .to_string(&mut self.ctx)
                .expect("stringify")
                .to_std_string_escaped()
        }

        fn click(&mut self, selector: &str) {
            let found = self.eval(&format!("click({})", js_string(selector)));
            assert_eq!(found, "true", "no element for {selector}");
        }

        fn type_text(&mut self, step_id: &str, text: &str) {
            self.eval(&format!("type({}, {})", js_string(step_id), js_string(text)));
        }

        fn advance(&mut self, ms: u64) {
            self.eval(&format!("advance({ms});"));
        }

        fn snapshot(&mut self) -> Value {
            serde_json::from_str(&self.eval("snapshot()")).expect("snapshot json")
        }
    }

    fn js_string(value: &str) -> String {
        serde_json::to_string(value).expect("string literal")
    }

    fn manifest_for(questions: Vec<Question>, thank_you_ms: u64) -> RuntimeManifest {
        let mut def = SurveyDefinition::default();
        def.questions = questions;
        def.star_rating.max_stars = Some(5);
        def.video_config.continue_time = Some(9000);
        def.thank_you_duration = Some(thank_you_ms);
        compile(&def, &GeneratorSettings::default())
            .expect("compile")
            .manifest
    }

    fn tracked(snapshot: &Value) -> Vec<Value> {
        snapshot["calls"]
            .as_array()
            .expect("calls")
            .iter()
            .filter(|call| call["kind"] == "track")
            .cloned()
            .collect()
    }

    #[test]
    fn script_can_sit_inside_a_script_element() {
        assert!(!RUNTIME_SCRIPT.to_lowercase().contains("</script"));
        assert!(!RUNTIME_SCRIPT.contains("{{"));
    }

    #[test]
    fn script_reads_every_manifest_key() {
        let mut def = SurveyDefinition::default();
        def.questions = vec![Question::star_rating("a"), Question::text("b", None)];
        let bundle = compile(&def, &GeneratorSettings::default()).expect("compile");
        let manifest = serde_json::to_value(&bundle.manifest).expect("json");

        let mut keys = Vec::new();
        collect_keys(&manifest, &mut keys);
        for key in keys {
            assert!(RUNTIME_SCRIPT.contains(&key), "runtime never reads '{key}'");
        }
        for token in ["starSelected", "starCount", "\"step\"", "\"submitted\""] {
            assert!(RUNTIME_SCRIPT.contains(token), "{token}");
        }
    }

    #[test]
    fn script_double_submit_tracks_once() {
        let manifest = manifest_for(
            vec![Question::text("a", None), Question::text("b", None)],
            3000,
        );
        let mut run = ScriptRun::mount(&manifest, true);
        run.type_text("question-1", "first");
        run.click("#text-submit-1");
        run.click("#text-submit-1");
        let snapshot = run.snapshot();
        assert_eq!(tracked(&snapshot).len(), 1);
        assert_eq!(snapshot["active"], json!(["question-2"]));
    }

    #[test]
    fn script_star_submit_waits_for_a_selection() {
        let manifest = manifest_for(vec![Question::star_rating("a")], 3000);
        let mut run = ScriptRun::mount(&manifest, true);

        run.click("#survey-submit-1");
        let snapshot = run.snapshot();
        assert_eq!(snapshot["calls"], json!([]));
        assert_eq!(snapshot["armed"], json!([]));
        assert_eq!(snapshot["active"], json!(["question-1"]));

        run.click("#question-1 .starBtn3");
        let snapshot = run.snapshot();
        assert_eq!(snapshot["calls"], json!([]));
        assert_eq!(snapshot["armed"], json!(["survey-submit-1"]));

        run.click("#survey-submit-1");
        let snapshot = run.snapshot();
        let events = tracked(&snapshot);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["channel"], "feedback");
        assert_eq!(events[0]["event"]["feedback"], "3 Stars");
        assert_eq!(snapshot["active"], json!(["thank-you-step"]));
    }

    #[test]
    fn script_without_questions_opens_on_thank_you() {
        let manifest = manifest_for(vec![], 3000);
        let mut run = ScriptRun::mount(&manifest, true);
        let snapshot = run.snapshot();
        assert_eq!(snapshot["active"], json!(["thank-you-step"]));
        assert_eq!(snapshot["calls"], json!([]));
    }

    #[test]
    fn script_thank_you_timers() {
        let manifest = manifest_for(vec![], 3000);
        let mut run = ScriptRun::mount(&manifest, true);

        run.advance(2999);
        assert_eq!(run.snapshot()["overlayPresent"], true);

        run.advance(1);
        let snapshot = run.snapshot();
        assert_eq!(snapshot["overlayPresent"], false);
        assert_eq!(snapshot["calls"], json!([]));

        run.advance(299);
        assert_eq!(run.snapshot()["calls"], json!([]));

        run.advance(1);
        let snapshot = run.snapshot();
        assert_eq!(
            snapshot["calls"],
            json!([{"kind": "seekTo", "offset": 9000}, {"kind": "hide"}])
        );
        assert_eq!(snapshot["pendingTimers"], 0);
    }

    #[test]
    fn script_tears_down_without_host_capabilities() {
        let manifest = manifest_for(vec![Question::text("a", None)], 1000);
        let mut run = ScriptRun::mount(&manifest, false);
        run.type_text("question-1", "hello");
        run.click("#text-submit-1");
        run.advance(5000);
        let snapshot = run.snapshot();
        assert_eq!(snapshot["overlayPresent"], false);
        assert_eq!(snapshot["pendingTimers"], 0);
        assert_eq!(snapshot["calls"], json!([]));
    }

    #[test]
    fn script_and_machine_agree_on_a_walkthrough() {
        let manifest = manifest_for(
            vec![
                Question::star_rating("How was it?").with_tracking("q1", "Quality"),
                Question::text("Anything else?", None).with_tracking("q2", "Comments"),
            ],
            3000,
        );

        let mut run = ScriptRun::mount(&manifest, true);
        run.eval("host.offset = 7;");
        run.click("#question-1 .starBtn4");
        run.click("#survey-submit-1");
        run.type_text("question-2", "great service");
        run.click("#text-submit-2");
        run.advance(3000);
        run.advance(300);

        let mut machine = Machine::new(manifest);
        let mut host = RecordingHost {
            playback_offset: 7,
            calls: Vec::new(),
        };
        machine.select_star(0, 4);
        machine.submit(0, &mut host);
        machine.input_text(1, "great service");
        machine.submit(1, &mut host);
        machine.advance(3300, &mut host);

        let expected = host
            .calls
            .iter()
            .map(|call| match call {
                HostCall::Track { channel, event } => json!({
                    "kind": "track",
                    "channel": channel,
                    "event": serde_json::to_value(event).expect("event json"),
                }),
                HostCall::SeekTo(offset) => json!({"kind": "seekTo", "offset": offset}),
                HostCall::Hide => json!({"kind": "hide"}),
            })
            .collect::<Vec<Value>>();
        assert_eq!(expected.len(), 4);
        assert_eq!(run.snapshot()["calls"], Value::Array(expected));
    }

    fn collect_keys(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, inner) in map {
                    // `index` only feeds the Rust interpreter
                    if key != "index" && !out.contains(key) {
                        out.push(key.clone());
                    }
                    collect_keys(inner, out);
                }
            }
            Value::Array(items) => items.iter().for_each(|v| collect_keys(v, out)),
            _ => {}
        }
    }
}
