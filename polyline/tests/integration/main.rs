mod geometry;
mod roundtrip;
