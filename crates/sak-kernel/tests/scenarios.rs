// SPDX-License-Identifier: MIT OR Apache-2.0

mod support;

use sak_core::{DecodingConstraint, Message, TerminationReason};
use sak_kernel::{ChatResponse, Kernel, KernelConfig, ToolRef};
use sak_parser::RawStructuredToolCall;
use std::sync::Arc;
use support::{CollectingObserver, DelayTool, ScriptedClient};

fn config() -> KernelConfig {
    KernelConfig {
        model: "test-model".to_string(),
        max_tokens: 512,
        temperature: 0.0,
        tool_choice: None,
        max_history_messages: 0,
        max_concurrency: 1,
    }
}

fn adapter() -> sak_adapter::ModelAdapter {
    sak_adapter::build("generic", DecodingConstraint::default())
}

// Scenario A: id preservation.
#[tokio::test]
async fn scenario_a_id_preservation() {
    let echo = Arc::new(DelayTool::new("echo", 0, "hi"));
    let client = Arc::new(ScriptedClient::new(vec![ChatResponse {
        content: None,
        tool_calls: Some(vec![RawStructuredToolCall { id: "call_XYZ".into(), name: "echo".into(), arguments_json: r#"{"text":"hi"}"#.into() }]),
        usage: None,
    }]));
    let observer = Arc::new(CollectingObserver::new());
    let kernel = Kernel::new(client, adapter(), vec![echo], observer, config());

    let messages = vec![Message::user("say hi")];
    let step = kernel.step(&messages, &[ToolRef::Name("echo".into())], 1).await.unwrap();

    assert_eq!(step.tool_calls[0].id, "call_XYZ");
    assert_eq!(step.tool_results[0].call_id, "call_XYZ");
}

// Scenario B: single-turn no-tool.
#[tokio::test]
async fn scenario_b_single_turn_no_tool() {
    let client = Arc::new(ScriptedClient::new(vec![ChatResponse { content: Some("42".into()), tool_calls: None, usage: None }]));
    let observer = Arc::new(CollectingObserver::new());
    let kernel = Kernel::new(client, adapter(), vec![], observer.clone(), config());

    let initial = vec![Message::system("be terse"), Message::user("what is 6*7?")];
    let result = kernel.run(initial, &[], 5, None).await.unwrap();

    assert_eq!(result.turn_count, 1);
    assert_eq!(result.termination_reason, TerminationReason::NoToolCalls);
    assert_eq!(result.final_message.content.as_deref(), Some("42"));

    assert_eq!(observer.count("kernel_start").await, 1);
    assert_eq!(observer.count("model_request").await, 1);
    assert_eq!(observer.count("model_response").await, 1);
    assert_eq!(observer.count("turn_complete").await, 1);
    assert_eq!(observer.count("kernel_end").await, 1);
}

// Scenario C: two-turn workflow.
#[tokio::test]
async fn scenario_c_two_turn_workflow() {
    let add = Arc::new(DelayTool::new("add", 0, "8"));
    let client = Arc::new(ScriptedClient::new(vec![
        ChatResponse {
            content: None,
            tool_calls: Some(vec![RawStructuredToolCall { id: "call_1".into(), name: "add".into(), arguments_json: r#"{"a":5,"b":3}"#.into() }]),
            usage: None,
        },
        ChatResponse { content: Some("The answer is 8.".into()), tool_calls: None, usage: None },
    ]));
    let observer = Arc::new(CollectingObserver::new());
    let kernel = Kernel::new(client, adapter(), vec![add], observer, config());

    let initial = vec![Message::system("sys"), Message::user("what is 5+3?")];
    let result = kernel.run(initial, &[ToolRef::Name("add".into())], 5, None).await.unwrap();

    assert_eq!(result.turn_count, 2);
    assert_eq!(result.history.len(), 5);
    assert!(result.history[2].has_tool_calls());
    assert_eq!(result.history[3].tool_call_id.as_deref(), Some("call_1"));
    assert_eq!(result.history[3].content.as_deref(), Some("8"));
    assert_eq!(result.history[4].content.as_deref(), Some("The answer is 8."));
}

// Scenario D: concurrent tools, ordered results.
#[tokio::test]
async fn scenario_d_concurrent_tools_ordered_results() {
    let add = Arc::new(DelayTool::new("add", 50, "3"));
    let mul = Arc::new(DelayTool::new("mul", 10, "12"));
    let client = Arc::new(ScriptedClient::new(vec![ChatResponse {
        content: None,
        tool_calls: Some(vec![
            RawStructuredToolCall { id: "c1".into(), name: "add".into(), arguments_json: r#"{"a":1,"b":2}"#.into() },
            RawStructuredToolCall { id: "c2".into(), name: "mul".into(), arguments_json: r#"{"a":3,"b":4}"#.into() },
        ]),
        usage: None,
    }]));
    let observer = Arc::new(CollectingObserver::new());
    let mut cfg = config();
    cfg.max_concurrency = 4;
    let kernel = Kernel::new(client, adapter(), vec![add, mul], observer, cfg);

    let step = kernel.step(&[Message::user("go")], &[ToolRef::Name("add".into()), ToolRef::Name("mul".into())], 1).await.unwrap();

    assert_eq!(step.tool_results[0].name, "add");
    assert_eq!(step.tool_results[1].name, "mul");
}

// Scenario E: unknown tool.
#[tokio::test]
async fn scenario_e_unknown_tool() {
    let client = Arc::new(ScriptedClient::new(vec![ChatResponse {
        content: None,
        tool_calls: Some(vec![RawStructuredToolCall { id: "c1".into(), name: "nonexistent_tool".into(), arguments_json: "{}".into() }]),
        usage: None,
    }]));
    let observer = Arc::new(CollectingObserver::new());
    let kernel = Kernel::new(client, adapter(), vec![], observer.clone(), config());

    let step = kernel.step(&[Message::user("go")], &[], 1).await.unwrap();

    assert_eq!(step.tool_results.len(), 1);
    assert!(step.tool_results[0].is_error);
    assert_eq!(step.tool_results[0].output, "Unknown tool: nonexistent_tool");
    assert_eq!(observer.count("tool_call").await, 1);
    assert_eq!(observer.count("tool_result").await, 1);
}

// Scenario: exactly max_turns with tool calls every turn.
#[tokio::test]
async fn max_turns_exhausted_with_tool_calls_every_turn() {
    let echo = Arc::new(DelayTool::new("echo", 0, "ok"));
    let responses: Vec<ChatResponse> = (0..3)
        .map(|i| ChatResponse {
            content: None,
            tool_calls: Some(vec![RawStructuredToolCall { id: format!("c{i}"), name: "echo".into(), arguments_json: "{}".into() }]),
            usage: None,
        })
        .collect();
    let client = Arc::new(ScriptedClient::new(responses));
    let observer = Arc::new(CollectingObserver::new());
    let kernel = Kernel::new(client, adapter(), vec![echo], observer, config());

    let result = kernel.run(vec![Message::user("go")], &[ToolRef::Name("echo".into())], 3, None).await.unwrap();

    assert_eq!(result.turn_count, 3);
    assert_eq!(result.termination_reason, TerminationReason::MaxTurns);
}

// Scenario: termination predicate matches on first tool result.
#[tokio::test]
async fn termination_predicate_matches_on_first_result() {
    let echo = Arc::new(DelayTool::new("echo", 0, "done"));
    let client = Arc::new(ScriptedClient::new(vec![ChatResponse {
        content: None,
        tool_calls: Some(vec![RawStructuredToolCall { id: "c1".into(), name: "echo".into(), arguments_json: "{}".into() }]),
        usage: None,
    }]));
    let observer = Arc::new(CollectingObserver::new());
    let kernel = Kernel::new(client, adapter(), vec![echo], observer, config());

    let predicate = |result: &sak_core::ToolResult| result.output == "done";
    let result = kernel.run(vec![Message::user("go")], &[ToolRef::Name("echo".into())], 10, Some(&predicate)).await.unwrap();

    assert_eq!(result.turn_count, 1);
    assert_eq!(result.termination_reason, TerminationReason::TerminationPredicate);
}

// Boundary: malformed JSON in structured tool-call arguments never raises.
#[tokio::test]
async fn malformed_tool_call_arguments_degrade_to_empty_map() {
    let client = Arc::new(ScriptedClient::new(vec![ChatResponse {
        content: None,
        tool_calls: Some(vec![RawStructuredToolCall { id: "c1".into(), name: "echo".into(), arguments_json: "{not json".into() }]),
        usage: None,
    }]));
    let echo = Arc::new(DelayTool::new("echo", 0, "ok"));
    let observer = Arc::new(CollectingObserver::new());
    let kernel = Kernel::new(client, adapter(), vec![echo], observer, config());

    let step = kernel.step(&[Message::user("go")], &[], 1).await.unwrap();
    assert!(step.tool_calls[0].arguments.is_empty());
}
