// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub trait Random: Send + Sync {
    fn usize(&self, range: std::ops::Range<usize>) -> usize;
    fn u64(&self, range: std::ops::RangeInclusive<u64>) -> u64;
}
