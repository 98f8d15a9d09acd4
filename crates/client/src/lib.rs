//! Client side of the summarizer: the submission-and-poll controller.
//!
//! [`controller::Controller`] submits a form to the job-start endpoint,
//! polls the progress endpoint on a fixed cadence through a cancellable
//! task, and renders the finished summary into a [`page::Page`]. The
//! HTTP side sits behind [`backend::JobBackend`] so the controller can be
//! driven without a live server.

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod page;
pub mod poller;
