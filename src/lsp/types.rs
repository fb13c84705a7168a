//! The message and structure catalogue.
//!
//! Wire member names are camelCase, struct fields snake_case. Structures are
//! declared through `lsp_struct!`, which generates the field-wise
//! encode/decode plumbing; decoding requires an object, ignores unknown
//! members, and reports the first missing required member or failing field.
//! String- and integer-valued enumerations get their codecs from
//! `lsp_string_enum!` / `lsp_int_enum!`.

use std::collections::HashMap;

use super::decode::Decode;
use super::encode::Encode;
use super::message::{Message, MessageKind, Notification, Request};
use super::primitives::{Boolean, DocumentUri, Integer, Null, Uinteger, Uri};
use super::CodecError;
use crate::json::{Builder, Kind, Member, Value, ValueExt};
use crate::one_of::{OneOf2, OneOf3};

macro_rules! lsp_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $kind:ident $field:ident = $wire:literal : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: lsp_struct!(@ty $kind $ty) ),*
        }

        impl Encode for $name {
            fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
                #[allow(unused_mut)]
                let mut members = Vec::new();
                $( lsp_struct!(@encode $kind (&self.$field), b, members, $wire); )*
                Ok(b.object(members))
            }
        }

        impl Decode for $name {
            fn decode(v: &Value) -> Result<Self, CodecError> {
                if v.kind() != Kind::Object {
                    return Err(CodecError::NotAnObject);
                }
                Ok(Self {
                    $( $field: lsp_struct!(@decode $kind v, $wire), )*
                })
            }
        }
    };

    (@ty required $ty:ty) => { $ty };
    (@ty optional $ty:ty) => { Option<$ty> };

    (@encode required $value:expr, $b:ident, $members:ident, $wire:literal) => {
        $members.push(Member::new($wire, $value.encode($b)?));
    };
    (@encode optional $value:expr, $b:ident, $members:ident, $wire:literal) => {
        if let Some(value) = $value {
            $members.push(Member::new($wire, value.encode($b)?));
        }
    };

    (@decode required $v:ident, $wire:literal) => {
        Decode::decode($v.member($wire)?)?
    };
    (@decode optional $v:ident, $wire:literal) => {
        if $v.has($wire) {
            Some(Decode::decode($v.member($wire)?)?)
        } else {
            None
        }
    };
}

macro_rules! lsp_string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl Default for $name {
            fn default() -> Self {
                lsp_string_enum!(@first $name; $($variant),+)
            }
        }

        impl Encode for $name {
            fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
                Ok(b.string(match self {
                    $( Self::$variant => $wire ),+
                }))
            }
        }

        impl Decode for $name {
            fn decode(v: &Value) -> Result<Self, CodecError> {
                match v.try_string()? {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(CodecError::InvalidEnum {
                        name: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };

    (@first $name:ident; $head:ident $(, $tail:ident)*) => { $name::$head };
}

macro_rules! lsp_int_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl Default for $name {
            fn default() -> Self {
                lsp_int_enum!(@first $name; $($variant),+)
            }
        }

        impl Encode for $name {
            fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
                Ok(b.i64(*self as i64))
            }
        }

        impl Decode for $name {
            fn decode(v: &Value) -> Result<Self, CodecError> {
                let value = Integer::decode(v)?;
                match value {
                    $( $value => Ok(Self::$variant), )+
                    _ => Err(CodecError::InvalidEnum {
                        name: stringify!($name),
                        value: value.to_string(),
                    }),
                }
            }
        }
    };

    (@first $name:ident; $head:ident $(, $tail:ident)*) => { $name::$head };
}

macro_rules! lsp_request {
    ($name:ident = $method:literal, params = $params:expr,
     success = $success:ty, failure = $failure:ty, has_failure = $has_failure:expr) => {
        impl Message for $name {
            const METHOD: &'static str = $method;
            const HAS_PARAMS: bool = $params;
            const KIND: MessageKind = MessageKind::Request;
        }

        impl Request for $name {
            type Success = $success;
            type Failure = $failure;
            const HAS_FAILURE: bool = $has_failure;
        }
    };
}

macro_rules! lsp_notification {
    ($name:ident = $method:literal, params = $params:expr) => {
        impl Message for $name {
            const METHOD: &'static str = $method;
            const HAS_PARAMS: bool = $params;
            const KIND: MessageKind = MessageKind::Notification;
        }

        impl Notification for $name {}
    };
}

// ----------------------------------------------------------------------------
// Base structures
// ----------------------------------------------------------------------------

/// A zero-based position in a document. `character` counts UTF-16 code units
/// unless another encoding was negotiated. Ordering is lexicographic: line
/// first, then character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: Uinteger,
    pub character: Uinteger,
}

impl Position {
    pub fn new(line: Uinteger, character: Uinteger) -> Self {
        Self { line, character }
    }
}

impl Encode for Position {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        Ok(b.object(vec![
            Member::new("line", self.line.encode(b)?),
            Member::new("character", self.character.encode(b)?),
        ]))
    }
}

impl Decode for Position {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        if v.kind() != Kind::Object {
            return Err(CodecError::NotAnObject);
        }
        Ok(Self {
            line: Decode::decode(v.member("line")?)?,
            character: Decode::decode(v.member("character")?)?,
        })
    }
}

/// A half-open span between two positions, `start <= end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl Encode for Range {
    fn encode(&self, b: &Builder) -> Result<Value, CodecError> {
        Ok(b.object(vec![
            Member::new("start", self.start.encode(b)?),
            Member::new("end", self.end.encode(b)?),
        ]))
    }
}

impl Decode for Range {
    fn decode(v: &Value) -> Result<Self, CodecError> {
        if v.kind() != Kind::Object {
            return Err(CodecError::NotAnObject);
        }
        Ok(Self {
            start: Decode::decode(v.member("start")?)?,
            end: Decode::decode(v.member("end")?)?,
        })
    }
}

lsp_struct! {
    pub struct Location {
        required uri = "uri": DocumentUri,
        required range = "range": Range,
    }
}

lsp_struct! {
    pub struct TextEdit {
        required range = "range": Range,
        required new_text = "newText": String,
    }
}

lsp_struct! {
    pub struct TextDocumentIdentifier {
        required uri = "uri": DocumentUri,
    }
}

lsp_struct! {
    pub struct TextDocumentItem {
        required uri = "uri": DocumentUri,
        required language_id = "languageId": String,
        required version = "version": Integer,
        required text = "text": String,
    }
}

lsp_struct! {
    pub struct VersionedTextDocumentIdentifier {
        required uri = "uri": DocumentUri,
        required version = "version": Integer,
    }
}

lsp_struct! {
    pub struct WorkspaceFolder {
        required uri = "uri": Uri,
        required name = "name": String,
    }
}

lsp_struct! {
    pub struct ClientInfo {
        required name = "name": String,
        optional version = "version": String,
    }
}

lsp_struct! {
    pub struct ServerInfo {
        required name = "name": String,
        optional version = "version": String,
    }
}

lsp_string_enum! {
    pub enum MarkupKind {
        PlainText = "plaintext",
        Markdown = "markdown",
    }
}

lsp_string_enum! {
    pub enum TraceValue {
        Off = "off",
        Messages = "messages",
        Verbose = "verbose",
    }
}

lsp_int_enum! {
    pub enum DiagnosticSeverity {
        Error = 1,
        Warning = 2,
        Information = 3,
        Hint = 4,
    }
}

lsp_struct! {
    pub struct MarkupContent {
        required kind = "kind": MarkupKind,
        required value = "value": String,
    }
}

lsp_struct! {
    pub struct Hover {
        required contents = "contents": MarkupContent,
        optional range = "range": Range,
    }
}

lsp_struct! {
    pub struct Diagnostic {
        required range = "range": Range,
        optional severity = "severity": DiagnosticSeverity,
        /// `integer | string` on the wire; non-disjoint union, integer wins.
        optional code = "code": OneOf2<Integer, String>,
        optional source = "source": String,
        required message = "message": String,
    }
}

lsp_struct! {
    /// Recursive: each selection range may name the range that contains it.
    pub struct SelectionRange {
        required range = "range": Range,
        optional parent = "parent": Box<SelectionRange>,
    }
}

lsp_int_enum! {
    pub enum SymbolKind {
        File = 1,
        Module = 2,
        Namespace = 3,
        Package = 4,
        Class = 5,
        Method = 6,
        Property = 7,
        Field = 8,
        Constructor = 9,
        Enum = 10,
        Interface = 11,
        Function = 12,
        Variable = 13,
        Constant = 14,
        String = 15,
        Number = 16,
        Boolean = 17,
        Array = 18,
        Object = 19,
        Key = 20,
        Null = 21,
        EnumMember = 22,
        Struct = 23,
        Event = 24,
        Operator = 25,
        TypeParameter = 26,
    }
}

lsp_struct! {
    /// Recursive: symbols nest through `children`.
    pub struct DocumentSymbol {
        required name = "name": String,
        optional detail = "detail": String,
        required kind = "kind": SymbolKind,
        required range = "range": Range,
        required selection_range = "selectionRange": Range,
        optional children = "children": Vec<DocumentSymbol>,
    }
}

lsp_struct! {
    /// One edit applied to a document's text; `range` plus `text` replaces,
    /// a bare `text` replaces the whole document.
    pub struct TextDocumentContentChangePartial {
        required range = "range": Range,
        optional range_length = "rangeLength": Uinteger,
        required text = "text": String,
    }
}

lsp_struct! {
    pub struct TextDocumentContentChangeWholeDocument {
        required text = "text": String,
    }
}

/// The partial shape carries a `range`, so it must be tried first.
pub type TextDocumentContentChangeEvent =
    OneOf2<TextDocumentContentChangePartial, TextDocumentContentChangeWholeDocument>;

lsp_struct! {
    pub struct WorkspaceEdit {
        optional changes = "changes": HashMap<String, Vec<TextEdit>>,
    }
}

lsp_int_enum! {
    pub enum MessageType {
        Error = 1,
        Warning = 2,
        Info = 3,
        Log = 4,
    }
}

lsp_struct! {
    pub struct MessageActionItem {
        required title = "title": String,
    }
}

// ----------------------------------------------------------------------------
// Capabilities
// ----------------------------------------------------------------------------

lsp_struct! {
    pub struct WorkspaceClientCapabilities {
        optional apply_edit = "applyEdit": Boolean,
        optional workspace_folders = "workspaceFolders": Boolean,
        optional configuration = "configuration": Boolean,
    }
}

lsp_struct! {
    pub struct TextDocumentSyncClientCapabilities {
        optional dynamic_registration = "dynamicRegistration": Boolean,
        optional will_save = "willSave": Boolean,
        optional will_save_wait_until = "willSaveWaitUntil": Boolean,
        optional did_save = "didSave": Boolean,
    }
}

lsp_struct! {
    pub struct HoverClientCapabilities {
        optional dynamic_registration = "dynamicRegistration": Boolean,
        optional content_format = "contentFormat": Vec<MarkupKind>,
    }
}

lsp_struct! {
    pub struct TextDocumentClientCapabilities {
        optional synchronization = "synchronization": TextDocumentSyncClientCapabilities,
        optional hover = "hover": HoverClientCapabilities,
    }
}

lsp_struct! {
    pub struct ClientCapabilities {
        optional workspace = "workspace": WorkspaceClientCapabilities,
        optional text_document = "textDocument": TextDocumentClientCapabilities,
    }
}

lsp_struct! {
    pub struct HoverOptions {
        optional work_done_progress = "workDoneProgress": Boolean,
    }
}

lsp_struct! {
    pub struct ServerCapabilities {
        optional position_encoding = "positionEncoding": String,
        optional hover_provider = "hoverProvider": OneOf2<Boolean, HoverOptions>,
        optional definition_provider = "definitionProvider": Boolean,
        optional selection_range_provider = "selectionRangeProvider": Boolean,
    }
}

// ----------------------------------------------------------------------------
// Requests
// ----------------------------------------------------------------------------

lsp_struct! {
    /// The `initialize` request, sent once as the first request of a session.
    pub struct InitializeRequest {
        required process_id = "processId": OneOf2<Integer, Null>,
        optional client_info = "clientInfo": ClientInfo,
        optional locale = "locale": String,
        optional root_path = "rootPath": OneOf2<String, Null>,
        optional root_uri = "rootUri": OneOf2<DocumentUri, Null>,
        required capabilities = "capabilities": ClientCapabilities,
        optional trace = "trace": TraceValue,
        optional workspace_folders = "workspaceFolders": OneOf2<Vec<WorkspaceFolder>, Null>,
    }
}

lsp_struct! {
    pub struct InitializeResult {
        required capabilities = "capabilities": ServerCapabilities,
        optional server_info = "serverInfo": ServerInfo,
    }
}

lsp_struct! {
    pub struct InitializeError {
        /// Whether the client should retry with a different configuration.
        required retry = "retry": Boolean,
    }
}

lsp_request!(InitializeRequest = "initialize", params = true,
    success = InitializeResult, failure = InitializeError, has_failure = true);

lsp_struct! {
    pub struct ShutdownRequest {}
}

lsp_request!(ShutdownRequest = "shutdown", params = false,
    success = Null, failure = Null, has_failure = false);

lsp_struct! {
    pub struct HoverRequest {
        required text_document = "textDocument": TextDocumentIdentifier,
        required position = "position": Position,
    }
}

lsp_request!(HoverRequest = "textDocument/hover", params = true,
    success = OneOf2<Hover, Null>, failure = Null, has_failure = false);

lsp_struct! {
    pub struct DefinitionRequest {
        required text_document = "textDocument": TextDocumentIdentifier,
        required position = "position": Position,
    }
}

lsp_request!(DefinitionRequest = "textDocument/definition", params = true,
    success = OneOf3<Location, Vec<Location>, Null>, failure = Null, has_failure = false);

lsp_struct! {
    pub struct DocumentSymbolRequest {
        required text_document = "textDocument": TextDocumentIdentifier,
    }
}

lsp_request!(DocumentSymbolRequest = "textDocument/documentSymbol", params = true,
    success = OneOf2<Vec<DocumentSymbol>, Null>, failure = Null, has_failure = false);

lsp_struct! {
    pub struct SelectionRangeRequest {
        required text_document = "textDocument": TextDocumentIdentifier,
        required positions = "positions": Vec<Position>,
    }
}

lsp_request!(SelectionRangeRequest = "textDocument/selectionRange", params = true,
    success = OneOf2<Vec<SelectionRange>, Null>, failure = Null, has_failure = false);

lsp_struct! {
    pub struct RenameRequest {
        required text_document = "textDocument": TextDocumentIdentifier,
        required position = "position": Position,
        required new_name = "newName": String,
    }
}

lsp_request!(RenameRequest = "textDocument/rename", params = true,
    success = OneOf2<WorkspaceEdit, Null>, failure = Null, has_failure = false);

lsp_struct! {
    pub struct ShowMessageRequest {
        required kind = "type": MessageType,
        required message = "message": String,
        optional actions = "actions": Vec<MessageActionItem>,
    }
}

lsp_request!(ShowMessageRequest = "window/showMessageRequest", params = true,
    success = OneOf2<MessageActionItem, Null>, failure = Null, has_failure = false);

// ----------------------------------------------------------------------------
// Notifications
// ----------------------------------------------------------------------------

lsp_struct! {
    pub struct InitializedNotification {}
}

lsp_notification!(InitializedNotification = "initialized", params = true);

lsp_struct! {
    pub struct ExitNotification {}
}

lsp_notification!(ExitNotification = "exit", params = false);

lsp_struct! {
    pub struct DidOpenTextDocumentNotification {
        required text_document = "textDocument": TextDocumentItem,
    }
}

lsp_notification!(DidOpenTextDocumentNotification = "textDocument/didOpen", params = true);

lsp_struct! {
    pub struct PublishDiagnosticsNotification {
        required uri = "uri": DocumentUri,
        optional version = "version": Integer,
        required diagnostics = "diagnostics": Vec<Diagnostic>,
    }
}

lsp_notification!(PublishDiagnosticsNotification = "textDocument/publishDiagnostics", params = true);

lsp_struct! {
    pub struct DidChangeTextDocumentNotification {
        required text_document = "textDocument": VersionedTextDocumentIdentifier,
        required content_changes = "contentChanges": Vec<TextDocumentContentChangeEvent>,
    }
}

lsp_notification!(DidChangeTextDocumentNotification = "textDocument/didChange", params = true);

lsp_struct! {
    pub struct DidCloseTextDocumentNotification {
        required text_document = "textDocument": TextDocumentIdentifier,
    }
}

lsp_notification!(DidCloseTextDocumentNotification = "textDocument/didClose", params = true);

lsp_struct! {
    pub struct DidSaveTextDocumentNotification {
        required text_document = "textDocument": TextDocumentIdentifier,
        optional text = "text": String,
    }
}

lsp_notification!(DidSaveTextDocumentNotification = "textDocument/didSave", params = true);

lsp_struct! {
    pub struct ShowMessageNotification {
        required kind = "type": MessageType,
        required message = "message": String,
    }
}

lsp_notification!(ShowMessageNotification = "window/showMessage", params = true);

lsp_struct! {
    pub struct LogMessageNotification {
        required kind = "type": MessageType,
        required message = "message": String,
    }
}

lsp_notification!(LogMessageNotification = "window/logMessage", params = true);

lsp_struct! {
    pub struct SetTraceNotification {
        required value = "value": TraceValue,
    }
}

lsp_notification!(SetTraceNotification = "$/setTrace", params = true);

lsp_struct! {
    pub struct CancelRequestNotification {
        required id = "id": OneOf2<Integer, String>,
    }
}

lsp_notification!(CancelRequestNotification = "$/cancelRequest", params = true);

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Value {
        Builder::new().parse(json).unwrap()
    }

    #[test]
    fn position_round_trip() {
        let b = Builder::new();
        let position = Position::new(3, 14);
        let json = position.encode(&b).unwrap();
        assert_eq!(json.json(), r#"{"character":14,"line":3}"#);
        assert_eq!(Position::decode(&json).unwrap(), position);
    }

    #[test]
    fn range_decode() {
        let v = parse(r#"{"start":{"line":1,"character":2},"end":{"line":3,"character":4}}"#);
        assert_eq!(
            Range::decode(&v).unwrap(),
            Range::new(Position::new(1, 2), Position::new(3, 4))
        );
    }

    #[test]
    fn struct_decode_requires_object() {
        assert!(matches!(
            ClientCapabilities::decode(&parse("null")),
            Err(CodecError::NotAnObject)
        ));
        assert!(matches!(
            ClientCapabilities::decode(&parse("42")),
            Err(CodecError::NotAnObject)
        ));
    }

    #[test]
    fn struct_decode_reports_missing_required_member() {
        let err = TextEdit::decode(&parse(r#"{"range":{"start":{"line":0,"character":0},"end":{"line":0,"character":0}}}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "object has no field with name 'newText'");
    }

    #[test]
    fn struct_decode_ignores_unknown_members() {
        let v = parse(r#"{"uri":"file:///a.rs","unknown":[1,2,3]}"#);
        let got = TextDocumentIdentifier::decode(&v).unwrap();
        assert_eq!(got.uri, "file:///a.rs");
    }

    #[test]
    fn optional_members_are_omitted_when_absent() {
        let b = Builder::new();
        let hover = Hover {
            contents: MarkupContent {
                kind: MarkupKind::Markdown,
                value: "**hi**".to_string(),
            },
            range: None,
        };
        assert_eq!(
            hover.encode(&b).unwrap().json(),
            r#"{"contents":{"kind":"markdown","value":"**hi**"}}"#
        );
    }

    #[test]
    fn string_enum_codec() {
        let b = Builder::new();
        assert_eq!(MarkupKind::PlainText.encode(&b).unwrap().json(), "\"plaintext\"");
        assert_eq!(MarkupKind::decode(&parse("\"markdown\"")).unwrap(), MarkupKind::Markdown);
        assert_eq!(
            MarkupKind::decode(&parse("\"sgml\"")).unwrap_err().to_string(),
            "invalid MarkupKind value 'sgml'"
        );
    }

    #[test]
    fn int_enum_codec() {
        let b = Builder::new();
        assert_eq!(DiagnosticSeverity::Warning.encode(&b).unwrap().json(), "2");
        assert_eq!(
            DiagnosticSeverity::decode(&parse("4")).unwrap(),
            DiagnosticSeverity::Hint
        );
        assert_eq!(
            DiagnosticSeverity::decode(&parse("9")).unwrap_err().to_string(),
            "invalid DiagnosticSeverity value '9'"
        );
    }

    #[test]
    fn diagnostic_code_union_prefers_integer() {
        let v = parse(
            r#"{"range":{"start":{"line":0,"character":0},"end":{"line":0,"character":5}},"code":404,"message":"gone"}"#,
        );
        let got = Diagnostic::decode(&v).unwrap();
        assert_eq!(got.code, Some(OneOf2::A(404)));

        let v = parse(
            r#"{"range":{"start":{"line":0,"character":0},"end":{"line":0,"character":5}},"code":"E0404","message":"gone"}"#,
        );
        let got = Diagnostic::decode(&v).unwrap();
        assert_eq!(got.code, Some(OneOf2::B("E0404".to_string())));
    }

    #[test]
    fn selection_range_recurses() {
        let v = parse(
            r#"{"range":{"start":{"line":2,"character":4},"end":{"line":2,"character":9}},
                "parent":{"range":{"start":{"line":0,"character":0},"end":{"line":5,"character":0}}}}"#,
        );
        let got = SelectionRange::decode(&v).unwrap();
        let parent = got.parent.as_deref().unwrap();
        assert_eq!(parent.range.end, Position::new(5, 0));
        assert!(parent.parent.is_none());

        let b = Builder::new();
        let json = got.encode(&b).unwrap();
        assert_eq!(SelectionRange::decode(&json).unwrap(), got);
    }

    #[test]
    fn server_capabilities_hover_provider_union() {
        let v = parse(r#"{"hoverProvider":true}"#);
        let got = ServerCapabilities::decode(&v).unwrap();
        assert_eq!(got.hover_provider, Some(OneOf2::A(true)));

        let v = parse(r#"{"hoverProvider":{"workDoneProgress":false}}"#);
        let got = ServerCapabilities::decode(&v).unwrap();
        assert_eq!(
            got.hover_provider,
            Some(OneOf2::B(HoverOptions {
                work_done_progress: Some(false)
            }))
        );
    }

    #[test]
    fn initialize_request_round_trip() {
        let v = parse(
            r#"{"processId":71875,
                "clientInfo":{"name":"My Awesome Editor","version":"1.2.3"},
                "locale":"en-gb",
                "rootPath":"/home/bob/src/langsvr",
                "rootUri":"file:///home/bob/src/langsvr",
                "capabilities":{
                    "workspace":{"applyEdit":true,"workspaceFolders":true,"configuration":true},
                    "textDocument":{
                        "synchronization":{"dynamicRegistration":true,"willSave":true,"willSaveWaitUntil":true,"didSave":true},
                        "hover":{"dynamicRegistration":true,"contentFormat":["markdown","plaintext"]}
                    }
                },
                "trace":"off",
                "workspaceFolders":[{"uri":"file:///home/bob/src/langsvr","name":"langsvr"}]}"#,
        );
        let got = InitializeRequest::decode(&v).unwrap();

        let expected = InitializeRequest {
            process_id: OneOf2::A(71875),
            client_info: Some(ClientInfo {
                name: "My Awesome Editor".to_string(),
                version: Some("1.2.3".to_string()),
            }),
            locale: Some("en-gb".to_string()),
            root_path: Some(OneOf2::A("/home/bob/src/langsvr".to_string())),
            root_uri: Some(OneOf2::A("file:///home/bob/src/langsvr".to_string())),
            capabilities: ClientCapabilities {
                workspace: Some(WorkspaceClientCapabilities {
                    apply_edit: Some(true),
                    workspace_folders: Some(true),
                    configuration: Some(true),
                }),
                text_document: Some(TextDocumentClientCapabilities {
                    synchronization: Some(TextDocumentSyncClientCapabilities {
                        dynamic_registration: Some(true),
                        will_save: Some(true),
                        will_save_wait_until: Some(true),
                        did_save: Some(true),
                    }),
                    hover: Some(HoverClientCapabilities {
                        dynamic_registration: Some(true),
                        content_format: Some(vec![MarkupKind::Markdown, MarkupKind::PlainText]),
                    }),
                }),
            },
            trace: Some(TraceValue::Off),
            workspace_folders: Some(OneOf2::A(vec![WorkspaceFolder {
                uri: "file:///home/bob/src/langsvr".to_string(),
                name: "langsvr".to_string(),
            }])),
        };
        assert_eq!(got, expected);

        // Re-encoding produces semantically equal JSON.
        let b = Builder::new();
        let reencoded = got.encode(&b).unwrap();
        assert_eq!(InitializeRequest::decode(&reencoded).unwrap(), expected);
    }

    #[test]
    fn initialize_request_null_process_id() {
        let v = parse(r#"{"processId":null,"capabilities":{}}"#);
        let got = InitializeRequest::decode(&v).unwrap();
        assert_eq!(got.process_id, OneOf2::B(Null));
    }

    #[test]
    fn message_facts() {
        assert_eq!(InitializeRequest::METHOD, "initialize");
        assert!(InitializeRequest::HAS_PARAMS);
        assert_eq!(InitializeRequest::KIND, MessageKind::Request);
        assert!(InitializeRequest::HAS_FAILURE);

        assert_eq!(ShutdownRequest::METHOD, "shutdown");
        assert!(!ShutdownRequest::HAS_PARAMS);
        assert!(!ShutdownRequest::HAS_FAILURE);

        assert_eq!(ExitNotification::METHOD, "exit");
        assert_eq!(ExitNotification::KIND, MessageKind::Notification);
        assert_eq!(CancelRequestNotification::METHOD, "$/cancelRequest");
    }

    #[test]
    fn content_change_union_prefers_partial() {
        let v = parse(
            r#"[{"range":{"start":{"line":0,"character":0},"end":{"line":0,"character":3}},"text":"new"},
                {"text":"whole document"}]"#,
        );
        let got = Vec::<TextDocumentContentChangeEvent>::decode(&v).unwrap();
        assert_eq!(got.len(), 2);
        assert!(matches!(got[0], OneOf2::A(ref partial) if partial.text == "new"));
        assert!(matches!(got[1], OneOf2::B(ref whole) if whole.text == "whole document"));
    }

    #[test]
    fn workspace_edit_changes_map() {
        let b = Builder::new();
        let mut changes = HashMap::new();
        changes.insert(
            "file:///a.rs".to_string(),
            vec![TextEdit {
                range: Range::new(Position::new(0, 0), Position::new(0, 3)),
                new_text: "bar".to_string(),
            }],
        );
        let edit = WorkspaceEdit {
            changes: Some(changes),
        };
        let json = edit.encode(&b).unwrap();
        assert_eq!(WorkspaceEdit::decode(&json).unwrap(), edit);
    }

    #[test]
    fn document_symbol_recurses() {
        let v = parse(
            r#"{"name":"Session","kind":5,
                "range":{"start":{"line":10,"character":0},"end":{"line":40,"character":1}},
                "selectionRange":{"start":{"line":10,"character":7},"end":{"line":10,"character":14}},
                "children":[{"name":"receive","kind":6,
                    "range":{"start":{"line":20,"character":4},"end":{"line":30,"character":5}},
                    "selectionRange":{"start":{"line":20,"character":11},"end":{"line":20,"character":18}}}]}"#,
        );
        let got = DocumentSymbol::decode(&v).unwrap();
        assert_eq!(got.kind, SymbolKind::Class);
        let children = got.children.as_deref().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "receive");
        assert_eq!(children[0].kind, SymbolKind::Method);
        assert!(children[0].children.is_none());

        let b = Builder::new();
        let json = got.encode(&b).unwrap();
        assert_eq!(DocumentSymbol::decode(&json).unwrap(), got);
    }

    #[test]
    fn definition_result_union() {
        type DefinitionResult = <DefinitionRequest as Request>::Success;

        let one = DefinitionResult::decode(&parse(
            r#"{"uri":"file:///a.rs","range":{"start":{"line":1,"character":0},"end":{"line":1,"character":3}}}"#,
        ))
        .unwrap();
        assert!(matches!(one, OneOf3::A(_)));

        let many = DefinitionResult::decode(&parse(
            r#"[{"uri":"file:///a.rs","range":{"start":{"line":1,"character":0},"end":{"line":1,"character":3}}}]"#,
        ))
        .unwrap();
        assert!(matches!(many, OneOf3::B(ref locations) if locations.len() == 1));

        let none = DefinitionResult::decode(&parse("null")).unwrap();
        assert!(matches!(none, OneOf3::C(Null)));
    }

    #[test]
    fn show_message_wire_member_is_type() {
        let b = Builder::new();
        let notification = ShowMessageNotification {
            kind: MessageType::Warning,
            message: "careful".to_string(),
        };
        assert_eq!(
            notification.encode(&b).unwrap().json(),
            r#"{"message":"careful","type":2}"#
        );
    }

    #[test]
    fn publish_diagnostics_round_trip() {
        let b = Builder::new();
        let notification = PublishDiagnosticsNotification {
            uri: "file:///a.rs".to_string(),
            version: Some(7),
            diagnostics: vec![Diagnostic {
                range: Range::new(Position::new(1, 0), Position::new(1, 5)),
                severity: Some(DiagnosticSeverity::Error),
                code: Some(OneOf2::B("E0308".to_string())),
                source: Some("rustc".to_string()),
                message: "mismatched types".to_string(),
            }],
        };
        let json = notification.encode(&b).unwrap();
        assert_eq!(
            PublishDiagnosticsNotification::decode(&json).unwrap(),
            notification
        );
    }
}
