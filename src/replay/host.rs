//! Scripted editor and recording lexer session

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::mem;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::plugin::binder::PROPERTY_THEME;
use crate::plugin::host::{LPEG_LEXER, NULL_LEXER};
use crate::plugin::{BufferId, EditorHost, LexerSession, PrivateCall, View, WindowId};

/// Window every scripted notification comes from
pub const EDITOR_WINDOW: WindowId = WindowId(1);

/// Window the scripted editor does not own
pub const STRAY_WINDOW: WindowId = WindowId(0);

const LPEG_LEXER_ID: i32 = 1000;
const BUILTIN_LEXER_ID: i32 = 2;

/// Something the plugin did that the user could observe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    LibraryLoaded {
        view: View,
        path: PathBuf,
    },
    Colourised {
        view: View,
        buffer: Option<BufferId>,
        grammar: String,
        theme: String,
    },
    Status {
        text: String,
    },
    Error {
        message: String,
    },
    Opened {
        path: PathBuf,
    },
    About {
        text: String,
    },
    Picker {
        languages: Vec<String>,
    },
}

type EffectLog = Rc<RefCell<Vec<Effect>>>;

/// Lexer state attached to a document
#[derive(Debug, Clone)]
struct DocumentLexer {
    id: i32,
    language: String,
    grammar: Option<String>,
    properties: HashMap<String, String>,
}

impl Default for DocumentLexer {
    fn default() -> Self {
        Self {
            id: NULL_LEXER,
            language: "null".to_string(),
            grammar: None,
            properties: HashMap::new(),
        }
    }
}

impl DocumentLexer {
    fn builtin(language: &str) -> Self {
        Self {
            id: BUILTIN_LEXER_ID,
            language: language.to_string(),
            ..Self::default()
        }
    }
}

/// A view that records what the plugin asks of the lexer engine
#[derive(Debug)]
pub struct RecordingSession {
    view: View,
    library: Option<PathBuf>,
    library_loads: bool,
    grammars: Option<Vec<String>>,
    buffer: Option<BufferId>,
    lexer: DocumentLexer,
    status: String,
    caret_style: i32,
    log: EffectLog,
}

impl RecordingSession {
    fn new(view: View, library_loads: bool, grammars: Option<Vec<String>>, log: EffectLog) -> Self {
        Self {
            view,
            library: None,
            library_loads,
            grammars,
            buffer: None,
            lexer: DocumentLexer::default(),
            status: String::new(),
            caret_style: 0,
            log,
        }
    }

    pub fn buffer(&self) -> Option<BufferId> {
        self.buffer
    }

    pub fn grammar(&self) -> Option<&str> {
        self.lexer.grammar.as_deref()
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.lexer.properties.get(key).map(String::as_str)
    }
}

impl LexerSession for RecordingSession {
    fn load_lexer_library(&mut self, path: &Path) {
        if self.library_loads {
            self.library = Some(path.to_path_buf());
            self.log.borrow_mut().push(Effect::LibraryLoaded {
                view: self.view,
                path: path.to_path_buf(),
            });
        }
    }

    fn set_lexer_language(&mut self, name: &str) {
        self.lexer = if name != LPEG_LEXER {
            DocumentLexer::builtin(name)
        } else if self.library.is_some() {
            DocumentLexer {
                id: LPEG_LEXER_ID,
                language: name.to_string(),
                ..DocumentLexer::default()
            }
        } else {
            DocumentLexer::default()
        };
    }

    fn lexer_id(&self) -> i32 {
        self.lexer.id
    }

    fn lexer_language(&self) -> String {
        self.lexer.language.clone()
    }

    fn set_property(&mut self, key: &str, value: &str) {
        self.lexer
            .properties
            .insert(key.to_string(), value.to_string());
    }

    fn private_call(&mut self, call: PrivateCall<'_>) {
        if let PrivateCall::SetGrammar(name) = call {
            let known = self
                .grammars
                .as_ref()
                .is_none_or(|grammars| grammars.iter().any(|g| g == name));
            if known {
                self.lexer.grammar = Some(name.to_string());
                self.status.clear();
            } else {
                self.lexer.grammar = None;
                self.status = format!("no grammar found for '{}'", name);
            }
        }
    }

    fn grammar_name(&mut self) -> String {
        self.lexer.grammar.clone().unwrap_or_default()
    }

    fn style_at_caret(&self) -> i32 {
        self.caret_style
    }

    fn style_name(&mut self, style: i32) -> String {
        match style {
            0 => "default".to_string(),
            1 => "whitespace".to_string(),
            2 => "comment".to_string(),
            3 => "string".to_string(),
            4 => "keyword".to_string(),
            _ => format!("style.{}", style),
        }
    }

    fn set_margin_width(&mut self, _margin: u32, _pixels: u32) {}

    fn colourise(&mut self, _start: usize, _end: Option<usize>) {
        let Some(grammar) = self.lexer.grammar.clone() else {
            return;
        };
        let theme = self
            .lexer
            .properties
            .get(PROPERTY_THEME)
            .cloned()
            .unwrap_or_default();
        self.log.borrow_mut().push(Effect::Colourised {
            view: self.view,
            buffer: self.buffer,
            grammar,
            theme,
        });
    }

    fn lexer_status(&mut self) -> String {
        self.status.clone()
    }
}

#[derive(Debug)]
struct ScriptedBuffer {
    path: PathBuf,
    view: View,
    lexer: DocumentLexer,
}

/// An editor whose documents and dialogs are driven by a replay script
#[derive(Debug)]
pub struct ScriptedHost {
    config_dir: PathBuf,
    buffers: BTreeMap<BufferId, ScriptedBuffer>,
    current: Option<BufferId>,
    main: RecordingSession,
    secondary: RecordingSession,
    picker_answer: Option<String>,
    log: EffectLog,
}

impl ScriptedHost {
    pub fn new(config_dir: &Path, library_loads: bool, grammars: Option<Vec<String>>) -> Self {
        let log = EffectLog::default();
        Self {
            config_dir: config_dir.to_path_buf(),
            buffers: BTreeMap::new(),
            current: None,
            main: RecordingSession::new(View::Main, library_loads, grammars.clone(), log.clone()),
            secondary: RecordingSession::new(View::Secondary, library_loads, grammars, log.clone()),
            picker_answer: None,
            log,
        }
    }

    /// Drain the effects recorded so far
    pub fn take_effects(&mut self) -> Vec<Effect> {
        mem::take(&mut *self.log.borrow_mut())
    }

    pub fn recording_session(&self, view: View) -> &RecordingSession {
        match view {
            View::Main => &self.main,
            View::Secondary => &self.secondary,
        }
    }

    /// Open a document in `view` and show it
    pub fn open(&mut self, buffer: BufferId, path: PathBuf, view: View, lexer: Option<&str>) {
        let lexer = lexer.map(DocumentLexer::builtin).unwrap_or_default();
        self.buffers
            .insert(buffer, ScriptedBuffer { path, view, lexer });
        self.show(buffer);
    }

    /// Show an open document in its view
    pub fn activate(&mut self, buffer: BufferId) -> Result<()> {
        self.require(buffer)?;
        self.show(buffer);
        Ok(())
    }

    pub fn set_path(&mut self, buffer: BufferId, path: PathBuf) -> Result<()> {
        self.require(buffer)?;
        if let Some(doc) = self.buffers.get_mut(&buffer) {
            doc.path = path;
        }
        Ok(())
    }

    /// Switch a document to one of the editor's own lexers
    pub fn change_language(&mut self, buffer: BufferId, language: &str) -> Result<()> {
        self.require(buffer)?;
        let lexer = DocumentLexer::builtin(language);
        if let Some(session) = self.showing(buffer) {
            session.lexer = lexer;
        } else if let Some(doc) = self.buffers.get_mut(&buffer) {
            doc.lexer = lexer;
        }
        Ok(())
    }

    /// Close a document; the lowest remaining buffer becomes current
    pub fn close(&mut self, buffer: BufferId) -> Result<()> {
        self.require(buffer)?;
        if let Some(session) = self.showing(buffer) {
            session.buffer = None;
            session.lexer = DocumentLexer::default();
        }
        self.buffers.remove(&buffer);

        self.current = None;
        if let Some(&next) = self.buffers.keys().next() {
            self.show(next);
        }
        Ok(())
    }

    pub fn set_caret_style(&mut self, style: i32) {
        let view = self.current_view();
        self.session(view).caret_style = style;
    }

    pub fn set_picker_answer(&mut self, answer: Option<String>) {
        self.picker_answer = answer;
    }

    fn require(&self, buffer: BufferId) -> Result<()> {
        if self.buffers.contains_key(&buffer) {
            Ok(())
        } else {
            Err(anyhow!("Buffer {} is not open", buffer))
        }
    }

    fn showing(&mut self, buffer: BufferId) -> Option<&mut RecordingSession> {
        [&mut self.main, &mut self.secondary]
            .into_iter()
            .find(|session| session.buffer == Some(buffer))
    }

    fn show(&mut self, buffer: BufferId) {
        let Some(view) = self.buffers.get(&buffer).map(|doc| doc.view) else {
            return;
        };
        let session = match view {
            View::Main => &mut self.main,
            View::Secondary => &mut self.secondary,
        };

        if session.buffer != Some(buffer) {
            if let Some(previous) = session.buffer.take()
                && let Some(doc) = self.buffers.get_mut(&previous)
            {
                doc.lexer = mem::take(&mut session.lexer);
            }
            if let Some(doc) = self.buffers.get_mut(&buffer) {
                session.lexer = mem::take(&mut doc.lexer);
            }
            session.buffer = Some(buffer);
        }

        self.current = Some(buffer);
    }
}

impl EditorHost for ScriptedHost {
    type Session = RecordingSession;

    fn plugins_config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    fn owns_window(&self, window: WindowId) -> bool {
        window == EDITOR_WINDOW
    }

    fn current_buffer(&self) -> BufferId {
        self.current.unwrap_or(BufferId(0))
    }

    fn current_view(&self) -> View {
        self.current
            .and_then(|buffer| self.buffers.get(&buffer))
            .map(|doc| doc.view)
            .unwrap_or_default()
    }

    fn file_name(&self, buffer: BufferId) -> String {
        self.buffers
            .get(&buffer)
            .and_then(|doc| doc.path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn full_path(&self, buffer: BufferId) -> Option<PathBuf> {
        self.buffers.get(&buffer).map(|doc| doc.path.clone())
    }

    fn open_file(&mut self, path: &Path) -> bool {
        self.log.borrow_mut().push(Effect::Opened {
            path: path.to_path_buf(),
        });
        true
    }

    fn set_status(&mut self, text: &str) {
        self.log.borrow_mut().push(Effect::Status {
            text: text.to_string(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.log.borrow_mut().push(Effect::Error {
            message: message.to_string(),
        });
    }

    fn show_about(&mut self, text: &str) {
        self.log.borrow_mut().push(Effect::About {
            text: text.to_string(),
        });
    }

    fn pick_language(&mut self, languages: &[&str]) -> Option<String> {
        self.log.borrow_mut().push(Effect::Picker {
            languages: languages.iter().map(|l| l.to_string()).collect(),
        });
        self.picker_answer.take()
    }

    fn session(&mut self, view: View) -> &mut RecordingSession {
        match view {
            View::Main => &mut self.main,
            View::Secondary => &mut self.secondary,
        }
    }
}
