// SPDX-License-Identifier: MIT OR Apache-2.0

use sak_error::{AdapterError, KernelError, KernelPhase, StructuredAgentsError, ToolExecutionError};

#[test]
fn kernel_error_carries_turn_and_phase() {
    let err = KernelError::new(3, KernelPhase::ModelCall, "endpoint unreachable");
    assert_eq!(err.turn, 3);
    assert_eq!(err.phase, KernelPhase::ModelCall);
    assert!(err.to_string().contains("turn 3"));
}

#[test]
fn kernel_error_converts_into_structured_agents_error() {
    let err: StructuredAgentsError = KernelError::new(1, KernelPhase::Format, "oops").into();
    assert!(matches!(err, StructuredAgentsError::Kernel(_)));
}

#[test]
fn tool_execution_error_carries_call_and_tool() {
    let err = ToolExecutionError::new("echo", "call_1", "backend crashed").with_code("BACKEND_CRASHED");
    assert_eq!(err.tool_name, "echo");
    assert_eq!(err.call_id, "call_1");
    assert_eq!(err.code.as_deref(), Some("BACKEND_CRASHED"));
}

#[test]
fn adapter_error_unknown_strategy_message() {
    let err = AdapterError::UnknownGrammarStrategy("xml_cfg".into());
    assert!(err.to_string().contains("xml_cfg"));
}
