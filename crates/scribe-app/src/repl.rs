//! Interactive editing session.
//!
//! A line-oriented REPL over one note. Plain lines replace the buffer
//! content; `:commands` drive history, transforms, dictation, and rewrite.
//! Speech events are pumped between commands with `tokio::select!`, so a
//! `:say` segment lands in the buffer while the prompt is idle, exactly as
//! an asynchronous recognizer's would.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use scribe_core::events::EditorEvent;
use scribe_core::{Result, ScribeConfig, Timestamp};
use scribe_dictation::{ChannelPlatform, RecognitionConfig};
use scribe_editor::{EditorSurface, Notebook, SurfaceNotice};
use scribe_rewrite::{FnRewriter, RewriteError, RewriteService, UnavailableRewriter};
use scribe_storage::NoteRepository;

use crate::commands::log_event;

const HELP: &str = "\
Plain lines replace the note content. Commands:
  :undo :redo :clear          history
  :strip <char>               remove every occurrence of one character
  :replace <find> [replace]   literal find/replace (replace defaults to empty)
  :improve                    send the buffer to the rewrite service
  :dictate :stop              start / stop the dictation session
  :say <text>                 feed a transcript segment (development platform)
  :history                    show history depth and cursor
  :save :quit                 persist / leave the session";

enum Flow {
    Continue,
    Quit,
}

enum Input {
    Line(Option<String>),
    Notice(Option<SurfaceNotice>),
}

/// Run the editing REPL on the notebook's selected note.
pub async fn run(
    notebook: &mut Notebook,
    repo: &NoteRepository,
    config: &ScribeConfig,
) -> Result<()> {
    let note = notebook
        .selected_note()
        .cloned()
        .ok_or_else(|| scribe_core::ScribeError::NoteNotFound {
            id: "selection".to_string(),
        })?;

    let platform = ChannelPlatform::new();
    let mut surface = EditorSurface::new(
        note.id,
        note.content,
        Some(Arc::new(platform.clone())),
        RecognitionConfig::for_language(&config.dictation.language),
    );

    let rewriter: Box<dyn RewriteService> = if config.rewrite.enabled {
        // The provider lives outside this workspace; without one wired in,
        // improve surfaces a clean failure instead of pretending.
        Box::new(FnRewriter::new(|_: &str| {
            Err(RewriteError::Unavailable(
                "no rewrite provider configured".to_string(),
            ))
        }))
    } else {
        Box::new(UnavailableRewriter)
    };

    tracing::debug!(
        note_id = %note.id,
        font_size = config.editor.font_size().0,
        "Editor session opened"
    );

    println!("Editing {}\n{}", note.id, HELP);
    if !surface.content().is_empty() {
        println!("---\n{}\n---", surface.content());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line?),
            notice = surface.next_notice() => Input::Notice(notice),
        };

        match input {
            Input::Line(None) => break,
            Input::Line(Some(line)) => {
                let flow =
                    handle_line(&line, &mut surface, &platform, rewriter.as_ref(), notebook, repo, config)
                        .await?;
                if matches!(flow, Flow::Quit) {
                    break;
                }
            }
            Input::Notice(Some(notice)) => print_notice(&notice, &surface),
            Input::Notice(None) => {}
        }
    }

    surface.shutdown();
    Ok(())
}

async fn handle_line(
    line: &str,
    surface: &mut EditorSurface,
    platform: &ChannelPlatform,
    rewriter: &dyn RewriteService,
    notebook: &mut Notebook,
    repo: &NoteRepository,
    config: &ScribeConfig,
) -> Result<Flow> {
    let line = line.trim_end();
    if line.is_empty() {
        return Ok(Flow::Continue);
    }
    if !line.starts_with(':') {
        surface.set_content(line);
        return Ok(Flow::Continue);
    }

    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest),
        None => (line, ""),
    };

    match command {
        ":undo" => println!("---\n{}\n---", surface.undo()),
        ":redo" => println!("---\n{}\n---", surface.redo()),
        ":clear" => {
            surface.clear();
            println!("Cleared.");
        }
        ":strip" => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    surface.remove_char(ch);
                    log_event(&EditorEvent::BufferTransformed {
                        note_id: surface.note_id(),
                        transform: "remove_char".to_string(),
                        timestamp: Timestamp::now(),
                    });
                    println!("---\n{}\n---", surface.content());
                }
                _ => println!("Usage: :strip <single char>"),
            }
        }
        ":replace" => {
            let (find, replace) = match rest.split_once(' ') {
                Some((find, replace)) => (find, replace),
                None => (rest, ""),
            };
            match surface.replace_all(find, replace) {
                Ok(()) => {
                    log_event(&EditorEvent::BufferTransformed {
                        note_id: surface.note_id(),
                        transform: "replace".to_string(),
                        timestamp: Timestamp::now(),
                    });
                    println!("---\n{}\n---", surface.content());
                }
                Err(e) => println!("Error: {}", e),
            }
        }
        ":improve" => {
            let from_chars = surface.content().chars().count();
            match surface.improve(rewriter).await {
                Ok(()) => {
                    log_event(&EditorEvent::RewriteApplied {
                        note_id: surface.note_id(),
                        from_chars,
                        to_chars: surface.content().chars().count(),
                        timestamp: Timestamp::now(),
                    });
                    println!("---\n{}\n---", surface.content());
                }
                Err(e) => {
                    log_event(&EditorEvent::RewriteFailed {
                        note_id: surface.note_id(),
                        reason: e.to_string(),
                        timestamp: Timestamp::now(),
                    });
                    println!("Error: {}", e);
                }
            }
        }
        ":dictate" => match surface.start_dictation() {
            Ok(()) => {
                log_event(&EditorEvent::DictationStarted {
                    note_id: surface.note_id(),
                    language: config.dictation.language.clone(),
                    timestamp: Timestamp::now(),
                });
                println!("Listening.");
            }
            Err(e) => println!("Error: {}", e),
        },
        ":stop" => {
            surface.stop_dictation();
            log_event(&EditorEvent::DictationStopped {
                note_id: surface.note_id(),
                timestamp: Timestamp::now(),
            });
            println!("Stopped.");
        }
        ":say" => {
            if rest.is_empty() {
                println!("Usage: :say <text>");
            } else if !platform.say(rest) {
                println!("No active dictation stream; use :dictate first.");
            }
        }
        ":history" => println!(
            "{} snapshots, at {} (undo: {}, redo: {})",
            surface.history_depth(),
            surface.history_position(),
            surface.can_undo(),
            surface.can_redo()
        ),
        ":save" => {
            save_notebook(surface, notebook, repo)?;
            println!("Saved.");
        }
        ":quit" => {
            if config.editor.autosave {
                save_notebook(surface, notebook, repo)?;
                println!("Saved.");
            } else if notebook.is_dirty() || surface.can_undo() {
                println!("Leaving without saving (autosave is off).");
            }
            return Ok(Flow::Quit);
        }
        ":help" => println!("{}", HELP),
        other => println!("Unknown command {}. {}", other, HELP),
    }

    Ok(Flow::Continue)
}

fn save_notebook(
    surface: &EditorSurface,
    notebook: &mut Notebook,
    repo: &NoteRepository,
) -> Result<()> {
    notebook.apply_edit(surface.note_id(), surface.content().to_string())?;
    notebook.save(repo)?;
    log_event(&EditorEvent::NotebookSaved {
        note_count: notebook.len(),
        timestamp: Timestamp::now(),
    });
    Ok(())
}

fn print_notice(notice: &SurfaceNotice, surface: &EditorSurface) {
    match notice {
        SurfaceNotice::SegmentMerged { segment } => {
            log_event(&EditorEvent::TranscriptMerged {
                note_id: surface.note_id(),
                segment_chars: segment.chars().count(),
                buffer_chars: surface.content().chars().count(),
                timestamp: Timestamp::now(),
            });
            println!("[dictation] {}", segment);
            println!("---\n{}\n---", surface.content());
        }
        SurfaceNotice::DictationFailed { kind, stopped } => {
            log_event(&EditorEvent::DictationFailed {
                note_id: surface.note_id(),
                reason: kind.to_string(),
                terminal: *stopped,
                timestamp: Timestamp::now(),
            });
            if *stopped {
                println!("[dictation] {}; session ended", kind);
            } else {
                println!("[dictation] {}", kind);
            }
        }
        SurfaceNotice::DictationEnded => {
            log_event(&EditorEvent::DictationEnded {
                note_id: surface.note_id(),
                timestamp: Timestamp::now(),
            });
            println!("[dictation] stream ended");
        }
    }
}
