mod correction_client_tests;
