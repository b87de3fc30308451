//! Operator precedence values, used solely to decide automatic
//! parenthesization during rendering (never evaluation order). Higher binds
//! tighter; a node is parenthesized when the enclosing context's precedence
//! exceeds its own.

pub const MIN: i32 = i32::MIN;
pub const MAX: i32 = i32::MAX;

pub const BRACKETS: i32 = MAX;
pub const COMMA: i32 = MIN;

pub const SINGLE_BRACKET: i32 = 20;

pub const PLUS: i32 = 100;
pub const MINUS: i32 = PLUS;
pub const MULTIPLY: i32 = 200;
pub const DIVIDE: i32 = MULTIPLY;
pub const POWER: i32 = 300;
pub const MODULO: i32 = DIVIDE;

/// Below multiplication but above addition, so `-a·b` keeps its sign bare
/// while `-(a+b)` gets parenthesized.
pub const NEGATE: i32 = 110;
pub const FRACTION: i32 = DIVIDE + 10;
pub const FACTORIAL: i32 = 400;

pub const DEGREE: i32 = 1200;
pub const PERCENT: i32 = DEGREE;
pub const ROOT: i32 = MAX;

pub const DEFINE: i32 = 0;
pub const LAMBDA: i32 = 10;

pub const EQUALS: i32 = 50;
pub const LESS: i32 = EQUALS;
pub const LESS_OR_EQUAL: i32 = EQUALS;
pub const GREATER: i32 = EQUALS;
pub const GREATER_OR_EQUAL: i32 = EQUALS;

pub const IN: i32 = 60;
pub const AND: i32 = 25;
pub const OR: i32 = AND;
pub const NOT: i32 = 30;

pub const IMPLICIT: i32 = MULTIPLY + 1;
pub const FUNCTION_CALL: i32 = IMPLICIT;

pub const MID: i32 = 75;
pub const GRID: i32 = 80;
pub const ITERATION: i32 = IMPLICIT;
pub const SUBSCRIPT: i32 = MAX;
pub const SUPERSCRIPT: i32 = POWER;
