// tests/session_tests.rs
// Snapshot loading and command dispatch

use scope_backtrace::interp::{init_module, run_repl, CommandError, CommandInterpreter, CommandReturn};
use scope_backtrace::{DebugHost, HostError, RenderOptions, SnapshotHost};
use std::fs;

const SNAPSHOT: &str = r#"{
  "selectedThread": 1,
  "threads": [
    {
      "id": 1,
      "name": "main",
      "stackFrames": [
        { "id": 1000, "name": "v8::internal::Heap::AllocateRaw(int)", "line": 210,
          "source": { "name": "heap-inl.h", "path": "/v8/src/heap/heap-inl.h" } },
        { "id": 1001, "name": "v8::internal::PerIsolateAssertType::HEAP_ALLOCATION_ASSERT, false>(v8::internal::Isolate*)",
          "line": 0, "source": { "path": "/v8/src/common/assert-scope.cc" } },
        { "id": 1002, "line": 12, "source": { "name": "d8.cc" } },
        { "id": 1003, "name": "main", "line": 5 }
      ]
    },
    {
      "id": 7,
      "name": "worker",
      "stackFrames": [
        { "id": 2000, "name": "v8::platform::WorkerThread::Run()", "line": 30,
          "source": { "path": "/v8/src/libplatform/worker-thread.cc" } }
      ]
    }
  ]
}"#;

const STACK_TRACE_RESPONSE: &str = r#"{
  "seq": 12,
  "type": "response",
  "request_seq": 11,
  "success": true,
  "command": "stackTrace",
  "body": {
    "stackFrames": [
      { "id": 1, "name": "v8::internal::PerThreadAssertType::HANDLE_ALLOCATION_ASSERT, true>()", "line": 3,
        "source": { "name": "handles.cc" } },
      { "id": 2, "name": "main()", "line": 9, "source": { "name": "main.cc" } }
    ],
    "totalFrames": 2
  }
}"#;

// Helper to write a snapshot file
fn create_snapshot(content: &str, name: &str) -> String {
    let path = format!("test_snapshot_{}.json", name);
    fs::write(&path, content).expect("Failed to write snapshot file");
    path
}

fn cleanup(path: &str) {
    let _ = fs::remove_file(path);
}

fn interpreter(color: bool) -> CommandInterpreter {
    let mut interp = CommandInterpreter::with_render_options(RenderOptions {
        color,
        ..RenderOptions::default()
    });
    init_module(&mut interp).expect("Failed to register commands");
    interp
}

fn run(interp: &CommandInterpreter, host: &mut SnapshotHost, line: &str) -> Result<Vec<String>, CommandError> {
    let mut result = CommandReturn::new();
    interp.handle_command(host, line, &mut result)?;
    Ok(result.take_lines())
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn test_load_session_snapshot() {
        let path = create_snapshot(SNAPSHOT, "session");
        let host = SnapshotHost::load(&path).expect("Failed to load snapshot");
        cleanup(&path);

        assert_eq!(host.selected_id(), Some(1));
        let threads = host.threads();
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].frame_count, 4);
        assert!(threads[0].selected);
        assert!(!threads[1].selected);

        let frames = host.selected_thread().expect("thread selected").frames();
        assert_eq!(frames[0].file_name.as_deref(), Some("heap-inl.h"));
        assert_eq!(frames[0].line, Some(210));
        assert_eq!(frames[1].line, None, "Line 0 means unknown");
        assert_eq!(frames[1].file_name.as_deref(), Some("assert-scope.cc"));
        assert_eq!(frames[2].signature, None);
        assert_eq!(frames[3].file_name, None);
        assert_eq!(frames[3].index, 3);
    }

    #[test]
    fn test_load_stack_trace_response() {
        let host = SnapshotHost::from_json_str(STACK_TRACE_RESPONSE).expect("Failed to parse response");
        assert_eq!(host.selected_id(), Some(1));
        assert_eq!(host.selected_thread().unwrap().frames().len(), 2);
    }

    #[test]
    fn test_file_name_from_windows_and_unix_paths() {
        let json = r#"{ "threads": [ { "id": 1, "stackFrames": [
            { "name": "a()", "line": 1, "source": { "path": "C:\\v8\\src\\heap.cc" } },
            { "name": "b()", "line": 2, "source": { "path": "/v8/src/isolate.cc" } },
            { "name": "c()", "line": 3, "source": { "path": "/v8/src/" } },
            { "name": "d()", "line": 4, "source": { "name": "", "path": "D:/mixed\\dir/api.cc" } }
        ] } ] }"#;
        let host = SnapshotHost::from_json_str(json).unwrap();
        let frames = host.selected_thread().unwrap().frames();

        assert_eq!(frames[0].file_name.as_deref(), Some("heap.cc"));
        assert_eq!(frames[1].file_name.as_deref(), Some("isolate.cc"));
        assert_eq!(frames[2].file_name, None, "Directory paths have no file name");
        assert_eq!(frames[3].file_name.as_deref(), Some("api.cc"));
    }

    #[test]
    fn test_missing_selection_defaults_to_first_thread() {
        let json = r#"{ "threads": [ { "id": 4, "stackFrames": [] }, { "id": 5 } ] }"#;
        let host = SnapshotHost::from_json_str(json).unwrap();
        assert_eq!(host.selected_id(), Some(4));
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            SnapshotHost::load("does_not_exist.json"),
            Err(HostError::Io { .. })
        ));
        assert!(matches!(SnapshotHost::from_json_str("{"), Err(HostError::Json(_))));
        assert!(matches!(
            SnapshotHost::from_json_str(r#"{ "frames": [] }"#),
            Err(HostError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SnapshotHost::from_json_str(r#"{ "selectedThread": 9, "threads": [ { "id": 1 } ] }"#),
            Err(HostError::UnknownThread(9))
        ));

        let failed = r#"{ "seq": 3, "type": "response", "request_seq": 2, "success": false,
                          "command": "stackTrace", "message": "notStopped" }"#;
        assert!(matches!(
            SnapshotHost::from_json_str(failed),
            Err(HostError::FailedResponse { .. })
        ));

        let threads = r#"{ "seq": 3, "type": "response", "request_seq": 2, "success": true,
                           "command": "threads", "body": { "threads": [] } }"#;
        assert!(matches!(
            SnapshotHost::from_json_str(threads),
            Err(HostError::UnexpectedCommand(_))
        ));
    }

    #[test]
    fn test_empty_session_has_no_selected_thread() {
        let host = SnapshotHost::from_json_str(r#"{ "threads": [] }"#).unwrap();
        assert!(matches!(host.selected_thread(), Err(HostError::NoSelectedThread)));
    }
}

#[cfg(test)]
mod command_tests {
    use super::*;

    #[test]
    fn test_init_module_registers_commands() {
        let interp = interpreter(true);
        assert!(interp.contains("bta"));
        assert!(interp.contains("thread"));
        assert_eq!(interp.command_names(), vec!["bta", "help", "thread"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut interp = interpreter(true);
        assert!(matches!(
            init_module(&mut interp),
            Err(CommandError::DuplicateCommand(name)) if name == "bta"
        ));
    }

    #[test]
    fn test_bta_on_selected_thread() {
        let interp = interpreter(true);
        let mut host = SnapshotHost::from_json_str(SNAPSHOT).unwrap();

        let lines = run(&interp, &mut host, "bta").expect("bta should succeed");

        // frame 2 has no name and is skipped; frame 1 adds an assertion line
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("[0 ] v8::internal::Heap::AllocateRaw "));
        assert!(lines[0].contains("heap-inl.h:210"));
        assert!(lines[2].contains("Disallow HEAP_ALLOCATION (Isolate)"));
        assert!(lines[2].starts_with("\x1b[91m"));
        assert!(lines[3].starts_with("[3 ] main "));
        assert!(lines[3].contains(":5"));
    }

    #[test]
    fn test_bta_count_and_no_color() {
        let interp = interpreter(true);
        let mut host = SnapshotHost::from_json_str(SNAPSHOT).unwrap();

        let lines = run(&interp, &mut host, "bta --count 2 --no-color").unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], " -> Disallow HEAP_ALLOCATION (Isolate)");

        let lines = run(&interp, &mut host, "bta -c 1").unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_bta_respects_interpreter_color_setting() {
        let interp = interpreter(false);
        let mut host = SnapshotHost::from_json_str(STACK_TRACE_RESPONSE).unwrap();

        let lines = run(&interp, &mut host, "bta").unwrap();
        assert_eq!(lines[1], " -> Allow HANDLE_ALLOCATION (Thread)");
        assert!(lines.iter().all(|l| !l.contains('\x1b')));
    }

    #[test]
    fn test_thread_select_changes_bta_output() {
        let interp = interpreter(true);
        let mut host = SnapshotHost::from_json_str(SNAPSHOT).unwrap();

        let out = run(&interp, &mut host, "thread select 7").unwrap();
        assert_eq!(out, vec!["Selected thread #7".to_string()]);

        let lines = run(&interp, &mut host, "bta").unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("v8::platform::WorkerThread::Run"));
        assert!(lines[0].contains("worker-thread.cc:30"));

        let listing = run(&interp, &mut host, "thread list").unwrap();
        assert_eq!(listing[0], "  thread #1: main (4 frames)");
        assert_eq!(listing[1], "* thread #7: worker (1 frames)");
    }

    #[test]
    fn test_command_errors() {
        let interp = interpreter(true);
        let mut host = SnapshotHost::from_json_str(SNAPSHOT).unwrap();

        assert!(matches!(
            run(&interp, &mut host, "frobnicate"),
            Err(CommandError::UnknownCommand(name)) if name == "frobnicate"
        ));
        assert!(matches!(
            run(&interp, &mut host, "bta \"unterminated"),
            Err(CommandError::Parse(_))
        ));
        assert!(matches!(
            run(&interp, &mut host, "bta --count many"),
            Err(CommandError::InvalidArguments { .. })
        ));
        assert!(matches!(
            run(&interp, &mut host, "thread select 99"),
            Err(CommandError::Host(HostError::UnknownThread(99)))
        ));
        assert!(run(&interp, &mut host, "   ").unwrap().is_empty());
    }

    #[test]
    fn test_help_lists_commands() {
        let interp = interpreter(true);
        let mut host = SnapshotHost::default();

        let lines = run(&interp, &mut host, "help").unwrap();
        assert!(lines.iter().any(|l| l.contains("bta") && l.contains("assertion scopes")));
        assert!(lines.iter().any(|l| l.contains("thread")));

        let lines = run(&interp, &mut host, "bta --help").unwrap();
        assert!(lines.iter().any(|l| l.contains("--count")));
    }

    #[test]
    fn test_bta_without_thread_fails() {
        let interp = interpreter(true);
        let mut host = SnapshotHost::default();
        assert!(matches!(
            run(&interp, &mut host, "bta"),
            Err(CommandError::Host(HostError::NoSelectedThread))
        ));
    }

    #[test]
    fn test_repl_runs_until_quit() {
        let interp = interpreter(false);
        let mut host = SnapshotHost::from_json_str(STACK_TRACE_RESPONSE).unwrap();
        let input = "bta\nbogus\nquit\nbta\n".as_bytes();
        let mut output = Vec::new();

        run_repl(&interp, &mut host, input, &mut output).expect("repl failed");

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Allow HANDLE_ALLOCATION").count(), 1, "Stops at quit");
        assert!(text.contains("error: 'bogus' is not a valid command"));
    }
}
