// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod state_tests;
pub mod types_tests;
