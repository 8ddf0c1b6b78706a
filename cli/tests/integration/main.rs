//! Integration tests for lute-pwa-setup
//!
//! These tests spawn the actual binary against scratch home and project
//! directories. The container runtime is pointed at a program that does
//! not exist, so detection never reaches a real daemon.

mod deploy_command;
