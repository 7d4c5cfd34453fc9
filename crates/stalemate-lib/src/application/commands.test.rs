use super::*;
use crate::application::config::AppConfig;
use crate::application::session::MemoryFeedProvider;
use crate::display::Display;

const CYCLE: &str = "process,action,resource
P1,hold,R1
P2,hold,R2
P1,request,R2
P2,request,R1
";

const CHAIN: &str = "process,action,resource
P1,hold,R1
P2,request,R1
P1,release,R1
";

const RESOLVED: &str = "process,action,resource
P1,hold,R1
P2,hold,R2
P1,request,R2
P2,request,R1
P2,release,R2
";

fn session_with(feeds: MemoryFeedProvider) -> CommandSession<MemoryFeedProvider> {
    let config = AppConfig {
        input_dir: PathBuf::from("cases"),
        ..AppConfig::default()
    };
    CommandSession::with_providers(config, Display::plain(), feeds)
}

fn session() -> CommandSession<MemoryFeedProvider> {
    session_with(
        MemoryFeedProvider::new()
            .with_feed("cases/cycle.csv", CYCLE)
            .with_feed("cases/chain.csv", CHAIN)
            .with_feed("cases/resolved.csv", RESOLVED)
            .with_feed("cases/broken.csv", "process,action,resource\nP1,grab,R1\n"),
    )
}

fn run(file: &str) -> Commands {
    Commands::Run {
        file: PathBuf::from(file),
        export: None,
        export_format: None,
        stop_on_deadlock: false,
    }
}

mod verdict_tests {
    use super::*;

    #[test]
    fn it_maps_exit_codes() {
        assert_eq!(Verdict::Clean.exit_code(), 0);
        assert_eq!(Verdict::Failed.exit_code(), 1);
        assert_eq!(Verdict::Deadlock.exit_code(), 2);
    }

    #[test]
    fn it_derives_from_detection() {
        assert_eq!(Verdict::from_deadlock(true), Verdict::Deadlock);
        assert_eq!(Verdict::from_deadlock(false), Verdict::Clean);
    }
}

mod handle_run_tests {
    use super::*;

    #[test]
    fn it_reports_deadlock_for_cycle() {
        let verdict = execute_command_with_session(run("cycle.csv"), &session()).unwrap();
        assert_eq!(verdict, Verdict::Deadlock);
    }

    #[test]
    fn it_reports_clean_for_chain() {
        let verdict = execute_command_with_session(run("chain.csv"), &session()).unwrap();
        assert_eq!(verdict, Verdict::Clean);
    }

    #[test]
    fn it_judges_the_final_state_only() {
        let verdict = execute_command_with_session(run("resolved.csv"), &session()).unwrap();
        assert_eq!(verdict, Verdict::Clean);
    }

    #[test]
    fn it_accepts_a_direct_path() {
        let verdict = execute_command_with_session(run("cases/cycle.csv"), &session()).unwrap();
        assert_eq!(verdict, Verdict::Deadlock);
    }

    #[test]
    fn it_fails_on_missing_feed() {
        let err = execute_command_with_session(run("nowhere.csv"), &session()).unwrap_err();
        assert!(err.to_string().contains("nowhere.csv"));
    }

    #[test]
    fn it_fails_on_invalid_action() {
        let err = execute_command_with_session(run("broken.csv"), &session()).unwrap_err();
        assert!(format!("{err:#}").contains("grab"));
    }

    #[test]
    fn it_stops_on_deadlock_and_still_reports_it() {
        let command = Commands::Run {
            file: PathBuf::from("resolved.csv"),
            export: None,
            export_format: None,
            stop_on_deadlock: true,
        };
        let verdict = execute_command_with_session(command, &session()).unwrap();
        assert_eq!(verdict, Verdict::Deadlock);
    }

    #[test]
    fn it_exports_the_step_log() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("steps.json");
        let command = Commands::Run {
            file: PathBuf::from("cycle.csv"),
            export: Some(export_path.clone()),
            export_format: None,
            stop_on_deadlock: false,
        };

        execute_command_with_session(command, &session()).unwrap();

        let text = std::fs::read_to_string(&export_path).unwrap();
        let steps: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(steps.as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn it_exports_csv_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("steps.log");
        let command = Commands::Run {
            file: PathBuf::from("chain.csv"),
            export: Some(export_path.clone()),
            export_format: None,
            stop_on_deadlock: false,
        };

        execute_command_with_session(command, &session()).unwrap();

        let text = std::fs::read_to_string(&export_path).unwrap();
        assert!(text.starts_with(export::CSV_HEADER));
        assert_eq!(text.lines().count(), 4);
    }
}

mod handle_check_tests {
    use super::*;

    #[test]
    fn it_matches_run_verdicts() {
        let session = session();
        for (file, expected) in [
            ("cycle.csv", Verdict::Deadlock),
            ("chain.csv", Verdict::Clean),
            ("resolved.csv", Verdict::Clean),
        ] {
            let command = Commands::Check {
                file: PathBuf::from(file),
            };
            assert_eq!(
                execute_command_with_session(command, &session).unwrap(),
                expected,
                "{file}"
            );
        }
    }
}

mod handle_state_and_graph_tests {
    use super::*;

    #[test]
    fn state_is_clean_even_when_deadlocked() {
        let command = Commands::State {
            file: PathBuf::from("cycle.csv"),
        };
        assert_eq!(
            execute_command_with_session(command, &session()).unwrap(),
            Verdict::Clean
        );
    }

    #[test]
    fn graph_is_clean_even_when_deadlocked() {
        let command = Commands::Graph {
            file: PathBuf::from("cycle.csv"),
        };
        assert_eq!(
            execute_command_with_session(command, &session()).unwrap(),
            Verdict::Clean
        );
    }
}

mod handle_cases_tests {
    use super::*;

    #[test]
    fn it_lists_the_input_dir() {
        let command = Commands::Cases {
            dir: None,
            pick: false,
        };
        assert_eq!(
            execute_command_with_session(command, &session()).unwrap(),
            Verdict::Clean
        );
    }

    #[test]
    fn it_tolerates_an_empty_dir() {
        let command = Commands::Cases {
            dir: Some(PathBuf::from("elsewhere")),
            pick: false,
        };
        assert_eq!(
            execute_command_with_session(command, &session()).unwrap(),
            Verdict::Clean
        );
    }

    #[test]
    fn it_fails_on_a_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let session = CommandSession::with_providers(
            AppConfig::default(),
            Display::plain(),
            crate::application::session::LiveFeedProvider,
        );
        let command = Commands::Cases {
            dir: Some(dir.path().join("absent")),
            pick: false,
        };
        assert!(execute_command_with_session(command, &session).is_err());
    }

    #[test]
    fn it_names_cases_by_file_name() {
        assert_eq!(case_name(Path::new("cases/cycle.csv")), "cycle.csv");
    }
}

mod handle_version_tests {
    use super::*;

    #[test]
    fn it_displays_version_information() {
        assert_eq!(
            execute_command_with_session(Commands::Version, &session()).unwrap(),
            Verdict::Clean
        );
    }
}
