mod support;

mod http_transport_tests;
