// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod controller;
pub mod events;

pub use controller::ViewerController;
pub use events::LoadEvent;
