pub mod certificate_type;
