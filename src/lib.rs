//! Scene model and interaction engine for the letter canvas editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! whole editing session: the letters and balls on the canvas, the current
//! selection, the pan offset, and the drag gesture in progress. The host
//! JavaScript layer only forwards raw input events to the engine and renders
//! the [`render::SceneSnapshot`] it gets back. Nothing is persisted; the
//! scene lives as long as the engine does.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`doc`] | Element types and the ordered element store |
//! | [`camera`] | Pan offset and screen/scene conversions |
//! | [`input`] | Pointer targets, selection, and the drag gesture state |
//! | [`hit`] | Hit-testing points against elements |
//! | [`render`] | Scene snapshot for the host renderer |
//! | [`config`] | Layout defaults and capability flags |
//! | [`consts`] | Shared numeric and style constants |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
