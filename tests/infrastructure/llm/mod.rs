mod openai_vision_reviewer_test;
