pub const GENERATED_VALUE: u32 = 42;
