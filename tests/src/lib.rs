#![cfg(test)]

mod fakes;
mod sweep;
