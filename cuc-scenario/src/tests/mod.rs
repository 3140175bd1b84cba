mod helpers;

use std::sync::Arc;

use cuc_core::addon::MockAddonApi;
use cuc_core::prelude::*;
use cuc_testutils::*;
use rstest::*;
use tracing_test::traced_test;

use self::helpers::*;
use super::*;
