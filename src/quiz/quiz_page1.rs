// Quiz page 1 definition
// Warm-up: three fruits, two distractors.

pub static PAGE1_QUESTION: [&str; 3] = [
    "images/fruit/apple.png",
    "images/fruit/banana.png",
    "images/fruit/cherry.png",
];

pub static PAGE1_IMAGES: [&str; 5] = [
    "images/fruit/cherry.png",
    "images/fruit/grape.png",
    "images/fruit/apple.png",
    "images/fruit/lemon.png",
    "images/fruit/banana.png",
];
