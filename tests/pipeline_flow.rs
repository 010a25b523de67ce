//! End-to-end pipeline tests over mock transports.
//!
//! Exercises the dispatch → consolidate flow without a network or ffmpeg:
//! frames are fabricated in memory, transcription is scripted per index,
//! and the consolidation transport is a scripted chat client.

use boardcast::api::MockChatClient;
use boardcast::config::ConsolidationConfig;
use boardcast::consolidate::{Consolidator, build_payload};
use boardcast::error::BoardcastError;
use boardcast::extract::Frame;
use boardcast::pipeline::OrderedDispatcher;
use boardcast::transcribe::client::{MockBehavior, MockFrameTranscriber};
use image::DynamicImage;
use std::sync::Arc;

fn frames(count: usize) -> Vec<Frame> {
    (0..count)
        .map(|i| Frame::new(i, DynamicImage::new_rgb8(8, 8), 30))
        .collect()
}

fn consolidation_config() -> ConsolidationConfig {
    ConsolidationConfig {
        initial_backoff_ms: 1,
        ..ConsolidationConfig::default()
    }
}

#[tokio::test]
async fn partial_failure_batch_produces_transcript_and_counts() {
    // Frame 1 fails; frames 0 and 2 carry text. The batch must survive,
    // count 2/3, and consolidate only the survivors in index order.
    let transcriber = Arc::new(
        MockFrameTranscriber::new()
            .with_behavior(0, MockBehavior::Text("y = mx + b".to_string()))
            .with_behavior(1, MockBehavior::Fail("connection reset".to_string()))
            .with_behavior(2, MockBehavior::Text("b is the intercept".to_string()))
            // Make the failing frame finish first
            .with_delay_ms(0, 30)
            .with_delay_ms(2, 15),
    );
    let dispatcher = OrderedDispatcher::new(transcriber, 4);
    let batch = dispatcher.dispatch(frames(3)).await.expect("dispatch");

    assert_eq!(batch.frames_succeeded, 2);
    assert_eq!(batch.frames_total, 3);

    let payload = build_payload(&batch.entries);
    let first = payload.find("y = mx + b").expect("first survivor present");
    let second = payload
        .find("b is the intercept")
        .expect("second survivor present");
    assert!(first < second, "survivors must keep index order");
    assert!(!payload.contains("connection reset"));

    let chat = Arc::new(MockChatClient::new().push_text("[0:00:00] y = mx + b, b is the intercept"));
    let consolidator = Consolidator::new(chat.clone(), consolidation_config());
    let transcript = consolidator
        .consolidate(&batch.entries)
        .await
        .expect("consolidate");

    assert_eq!(transcript, "[0:00:00] y = mx + b, b is the intercept");
    assert_eq!(chat.call_count(), 1);
}

#[tokio::test]
async fn all_blank_batch_never_reaches_consolidation() {
    let transcriber =
        Arc::new(MockFrameTranscriber::new().with_default(MockBehavior::Text("  \n".to_string())));
    let dispatcher = OrderedDispatcher::new(transcriber, 4);

    let chat = Arc::new(MockChatClient::new());
    let result = dispatcher.dispatch(frames(3)).await;

    assert!(matches!(
        result,
        Err(BoardcastError::NoValidFrames { frames_total: 3 })
    ));
    assert_eq!(chat.call_count(), 0, "no consolidation call may be made");
}

#[tokio::test]
async fn additive_board_content_flows_through_in_order() {
    // The board accumulates: frame 1 repeats frame 0's formula and adds a
    // new one. Both entries must reach the consolidation payload in index
    // order with their timestamps, and the consolidated text comes back
    // verbatim.
    let transcriber = Arc::new(
        MockFrameTranscriber::new()
            .with_behavior(0, MockBehavior::Text("2+2=4".to_string()))
            .with_behavior(1, MockBehavior::Text("2+2=4\n3+3=6".to_string())),
    );
    let dispatcher = OrderedDispatcher::new(transcriber, 2);
    let batch = dispatcher.dispatch(frames(2)).await.expect("dispatch");

    assert_eq!(batch.entries.len(), 2);
    assert_eq!(batch.entries[0].timestamp, "0:00:00");
    assert_eq!(batch.entries[1].timestamp, "0:00:30");

    let payload = build_payload(&batch.entries);
    assert!(payload.contains("Frame 1 [Timestamp: 0:00:00]:\n2+2=4"));
    assert!(payload.contains("Frame 2 [Timestamp: 0:00:30]:\n2+2=4\n3+3=6"));

    let merged = "[0:00:00] 2+2=4\n\n[0:00:30] 3+3=6";
    let chat = Arc::new(MockChatClient::new().push_text(merged));
    let consolidator = Consolidator::new(chat, consolidation_config());
    let transcript = consolidator
        .consolidate(&batch.entries)
        .await
        .expect("consolidate");

    // One mention of the repeated formula, new content tagged with the
    // timestamp where it appeared
    assert_eq!(transcript.matches("2+2=4").count(), 1);
    assert!(transcript.contains("[0:00:30] 3+3=6"));
}

#[tokio::test]
async fn rate_limited_consolidation_recovers_within_batch() {
    let transcriber = Arc::new(MockFrameTranscriber::new());
    let dispatcher = OrderedDispatcher::new(transcriber, 4);
    let batch = dispatcher.dispatch(frames(2)).await.expect("dispatch");

    let chat = Arc::new(
        MockChatClient::new()
            .push_status(429, "busy")
            .push_text("recovered transcript"),
    );
    let consolidator = Consolidator::new(chat.clone(), consolidation_config());
    let transcript = consolidator
        .consolidate(&batch.entries)
        .await
        .expect("consolidate");

    assert_eq!(transcript, "recovered transcript");
    assert_eq!(chat.call_count(), 2);
}

#[tokio::test]
async fn large_batch_with_scrambled_completions_keeps_every_outcome() {
    let mut transcriber = MockFrameTranscriber::new();
    for i in 0..32 {
        // Pseudo-random-ish delays scramble completion order
        transcriber = transcriber.with_delay_ms(i, ((i * 7) % 11) as u64);
        if i % 5 == 0 {
            transcriber = transcriber.with_behavior(i, MockBehavior::Fail("flaky".to_string()));
        }
    }
    let dispatcher = OrderedDispatcher::new(Arc::new(transcriber), 8);
    let batch = dispatcher.dispatch(frames(32)).await.expect("dispatch");

    assert_eq!(batch.outcomes.len(), 32);
    for (i, outcome) in batch.outcomes.iter().enumerate() {
        assert_eq!(outcome.index, i);
    }
    // 0, 5, 10, 15, 20, 25, 30 failed
    assert_eq!(batch.frames_succeeded, 25);
    assert_eq!(batch.frames_total, 32);
}
