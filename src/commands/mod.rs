/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`   — Interactive chat with the AI chef
- `video`  — Extract a recipe from a YouTube video, then chat about it
- `browse` — Dataset browsing: list, show, categories, suggest

These handlers are intentionally small and use the library components:
dataset, providers, and the chat session.
*/

pub mod browse;
pub mod chat;
pub mod video;
