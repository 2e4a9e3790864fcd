// Quiz page 2 definition
// Animals; the same picture appears twice in the target order.

pub static PAGE2_QUESTION: [&str; 4] = [
    "images/animal/cat.png",
    "images/animal/dog.png",
    "images/animal/cat.png",
    "images/animal/fish.png",
];

pub static PAGE2_IMAGES: [&str; 5] = [
    "images/animal/dog.png",
    "images/animal/fish.png",
    "images/animal/bird.png",
    "images/animal/cat.png",
    "images/animal/horse.png",
];
