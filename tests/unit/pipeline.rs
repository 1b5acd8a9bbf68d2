use super::*;
use crate::compose::RenderPlan;
use crate::publish::PublishReceipt;
use crate::render::FrameRGBA;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;

struct MemorySource(HashMap<String, Value>);

impl MatchSource for MemorySource {
    fn fetch(&self, match_id: &str) -> PitchcardResult<Value> {
        self.0
            .get(match_id)
            .cloned()
            .ok_or_else(|| PitchcardError::source(format!("no payload for {match_id}")))
    }
}

struct BlankBackend;

impl RenderBackend for BlankBackend {
    fn render_plan(&mut self, plan: &RenderPlan) -> PitchcardResult<FrameRGBA> {
        let (w, h) = (plan.canvas.width, plan.canvas.height);
        Ok(FrameRGBA {
            width: w,
            height: h,
            data: vec![255; (w * h * 4) as usize],
            premultiplied: true,
        })
    }
}

#[derive(Default)]
struct Recorder {
    images: RefCell<Vec<PathBuf>>,
    reject: bool,
}

impl Publisher for Recorder {
    fn publish(&self, image: &Path, caption: &str) -> PitchcardResult<PublishReceipt> {
        if self.reject {
            return Err(PitchcardError::publish("upload refused"));
        }
        self.images.borrow_mut().push(image.to_path_buf());
        Ok(PublishReceipt {
            caption: caption.to_string(),
            remote_id: None,
        })
    }
}

fn payload(id: u32) -> Value {
    json!({
        "general": { "matchId": id },
        "header": { "teams": [
            { "id": 1, "name": "Kaizer Chiefs", "isHome": true, "score": 1 },
            { "id": 2, "name": "Orlando Pirates", "score": 0 }
        ] }
    })
}

fn source() -> MemorySource {
    let mut payloads = HashMap::new();
    payloads.insert("101".to_string(), payload(101));
    payloads.insert("102".to_string(), payload(102));
    payloads.insert("103".to_string(), json!({ "header": { "teams": [] } }));
    MemorySource(payloads)
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_pipeline")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("mkdir");
    dir
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn batch_renders_each_match_and_collects_failures() {
    let dir = scratch_dir("render_only");
    let palette = Palette::default();
    let job = BatchJob {
        desired_titles: None,
        palette: &palette,
        output_dir: &dir,
        publisher: None,
    };
    let mut ledger = PostedLedger::empty(dir.join("posted.json"));

    let summary = generate_batch(
        &source(),
        &ids(&["101", "103", "999", "102"]),
        &job,
        &mut ledger,
        &mut BlankBackend,
    )
    .expect("batch");

    assert_eq!(summary.generated.len(), 2);
    assert!(dir.join("match_101.png").is_file());
    assert!(dir.join("match_102.png").is_file());
    assert!(!dir.join("match_103.png").exists());

    let failed: Vec<&str> = summary.failed.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(failed, ["103", "999"]);
    assert!(matches!(summary.failed[0].1, PitchcardError::Schema(_)));
    assert!(summary.published.is_empty());
    assert!(ledger.is_empty());
    assert!(!dir.join("posted.json").exists());
}

#[test]
fn published_matches_are_recorded_and_skipped_next_time() {
    let dir = scratch_dir("publish");
    let palette = Palette::default();
    let publisher = Recorder::default();
    let job = BatchJob {
        desired_titles: None,
        palette: &palette,
        output_dir: &dir,
        publisher: Some(&publisher),
    };
    let ledger_path = dir.join("posted.json");
    let mut ledger = PostedLedger::load(&ledger_path).expect("ledger");

    let first = generate_batch(&source(), &ids(&["101", "102"]), &job, &mut ledger, &mut BlankBackend)
        .expect("first run");
    assert_eq!(first.published, ids(&["101", "102"]));
    assert_eq!(publisher.images.borrow().len(), 2);

    let mut reloaded = PostedLedger::load(&ledger_path).expect("reload");
    let second = generate_batch(&source(), &ids(&["101", "102"]), &job, &mut reloaded, &mut BlankBackend)
        .expect("second run");
    assert_eq!(second.skipped, ids(&["101", "102"]));
    assert!(second.generated.is_empty());
    assert_eq!(publisher.images.borrow().len(), 2);
}

#[test]
fn publish_failure_keeps_the_image_and_leaves_the_ledger_alone() {
    let dir = scratch_dir("rejected");
    let palette = Palette::default();
    let publisher = Recorder {
        reject: true,
        ..Recorder::default()
    };
    let job = BatchJob {
        desired_titles: None,
        palette: &palette,
        output_dir: &dir,
        publisher: Some(&publisher),
    };
    let mut ledger = PostedLedger::empty(dir.join("posted.json"));

    let summary = generate_batch(&source(), &ids(&["101"]), &job, &mut ledger, &mut BlankBackend)
        .expect("batch");
    assert_eq!(summary.generated.len(), 1);
    assert!(dir.join("match_101.png").is_file());
    assert!(matches!(summary.failed[0].1, PitchcardError::Publish(_)));
    assert!(!ledger.contains("101"));
}

#[test]
fn unsafe_match_id_fails_without_writing() {
    let dir = scratch_dir("unsafe");
    let palette = Palette::default();
    let job = BatchJob {
        desired_titles: None,
        palette: &palette,
        output_dir: &dir,
        publisher: None,
    };
    let mut ledger = PostedLedger::empty(dir.join("posted.json"));

    let summary = generate_batch(&source(), &ids(&["../101"]), &job, &mut ledger, &mut BlankBackend)
        .expect("batch");
    assert!(matches!(summary.failed[0].1, PitchcardError::Source(_)));
    assert_eq!(std::fs::read_dir(&dir).expect("list").count(), 0);
}
