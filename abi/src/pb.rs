#![allow(clippy::all, non_camel_case_types)]

tonic::include_proto!("booking");
