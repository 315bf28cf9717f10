mod redis_store_tests;
