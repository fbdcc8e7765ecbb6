//! In-memory host used by the unit tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::host::{
    BufferId, EditorHost, LPEG_LEXER, LexerSession, NULL_LEXER, PrivateCall, View, WindowId,
};

pub const EDITOR_WINDOW: WindowId = WindowId(1);
pub const STRAY_WINDOW: WindowId = WindowId(99);

const LPEG_LEXER_ID: i32 = 1000;

#[derive(Debug, Default)]
pub struct FakeSession {
    pub library: Option<PathBuf>,
    pub library_broken: bool,
    pub lexer_id: i32,
    pub lexer_language: String,
    pub grammar: Option<String>,
    pub unknown_grammars: Vec<String>,
    pub properties: HashMap<String, String>,
    pub margins: HashMap<u32, u32>,
    pub private_calls: Vec<String>,
    pub colourised: usize,
    pub status: String,
    pub caret_style: i32,
}

impl FakeSession {
    pub fn new() -> Self {
        Self {
            lexer_id: NULL_LEXER,
            lexer_language: "null".to_string(),
            ..Default::default()
        }
    }
}

impl LexerSession for FakeSession {
    fn load_lexer_library(&mut self, path: &Path) {
        if !self.library_broken {
            self.library = Some(path.to_path_buf());
        }
    }

    fn set_lexer_language(&mut self, name: &str) {
        if name == LPEG_LEXER && self.library.is_some() {
            self.lexer_id = LPEG_LEXER_ID;
            self.lexer_language = name.to_string();
        } else if name != LPEG_LEXER {
            self.lexer_id = 2;
            self.lexer_language = name.to_string();
        } else {
            self.lexer_id = NULL_LEXER;
            self.lexer_language = "null".to_string();
        }
    }

    fn lexer_id(&self) -> i32 {
        self.lexer_id
    }

    fn lexer_language(&self) -> String {
        self.lexer_language.clone()
    }

    fn set_property(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }

    fn private_call(&mut self, call: PrivateCall<'_>) {
        match call {
            PrivateCall::DirectFunction => self.private_calls.push("direct_function".into()),
            PrivateCall::DocPointer => self.private_calls.push("doc_pointer".into()),
            PrivateCall::SetGrammar(name) => {
                self.private_calls.push(format!("grammar:{}", name));
                if self.unknown_grammars.iter().any(|g| g == name) {
                    self.status = format!("no grammar named {}", name);
                } else {
                    self.grammar = Some(name.to_string());
                }
            }
        }
    }

    fn grammar_name(&mut self) -> String {
        self.grammar.clone().unwrap_or_default()
    }

    fn style_at_caret(&self) -> i32 {
        self.caret_style
    }

    fn style_name(&mut self, style: i32) -> String {
        format!("style{}", style)
    }

    fn set_margin_width(&mut self, margin: u32, pixels: u32) {
        self.margins.insert(margin, pixels);
    }

    fn colourise(&mut self, _start: usize, _end: Option<usize>) {
        self.colourised += 1;
    }

    fn lexer_status(&mut self) -> String {
        self.status.clone()
    }
}

#[derive(Debug)]
pub struct FakeHost {
    pub config_dir: PathBuf,
    pub buffers: HashMap<BufferId, PathBuf>,
    pub current: BufferId,
    pub view: View,
    pub main: FakeSession,
    pub secondary: FakeSession,
    pub statuses: Vec<String>,
    pub errors: Vec<String>,
    pub opened: Vec<PathBuf>,
    pub about: Vec<String>,
    pub picker_answer: Option<String>,
    pub picker_offers: Vec<Vec<String>>,
}

impl FakeHost {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            buffers: HashMap::new(),
            current: BufferId(0),
            view: View::Main,
            main: FakeSession::new(),
            secondary: FakeSession::new(),
            statuses: Vec::new(),
            errors: Vec::new(),
            opened: Vec::new(),
            about: Vec::new(),
            picker_answer: None,
            picker_offers: Vec::new(),
        }
    }

    /// Register a buffer and make it the current one
    pub fn open(&mut self, buffer: BufferId, path: impl Into<PathBuf>) {
        self.buffers.insert(buffer, path.into());
        self.current = buffer;
    }

    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

impl EditorHost for FakeHost {
    type Session = FakeSession;

    fn plugins_config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    fn owns_window(&self, window: WindowId) -> bool {
        window == EDITOR_WINDOW
    }

    fn current_buffer(&self) -> BufferId {
        self.current
    }

    fn current_view(&self) -> View {
        self.view
    }

    fn file_name(&self, buffer: BufferId) -> String {
        self.buffers
            .get(&buffer)
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn full_path(&self, buffer: BufferId) -> Option<PathBuf> {
        self.buffers.get(&buffer).cloned()
    }

    fn open_file(&mut self, path: &Path) -> bool {
        self.opened.push(path.to_path_buf());
        true
    }

    fn set_status(&mut self, text: &str) {
        self.statuses.push(text.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn show_about(&mut self, text: &str) {
        self.about.push(text.to_string());
    }

    fn pick_language(&mut self, languages: &[&str]) -> Option<String> {
        self.picker_offers
            .push(languages.iter().map(|l| l.to_string()).collect());
        self.picker_answer.clone()
    }

    fn session(&mut self, view: View) -> &mut FakeSession {
        match view {
            View::Main => &mut self.main,
            View::Secondary => &mut self.secondary,
        }
    }
}
