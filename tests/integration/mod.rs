// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod helpers;
pub mod persistence_gateway_test;
pub mod routes_test;
pub mod store_sync_test;
